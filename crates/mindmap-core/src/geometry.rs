//! Geometric primitives shared by the input document and both output shapes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in map space (node locations, curve offsets)
//! - [`Size`] - Width and height returned by the measurement collaborator
//!
//! # Coordinate System
//!
//! Map coordinates are taken verbatim from the source document, which uses
//! the screen convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Coordinates are `f64` so values survive a decode/encode cycle unchanged.

use serde::{Deserialize, Serialize};

/// A 2D point in map coordinate space.
///
/// Serializes as `{ "x": .., "y": .. }`, which is the shape used for node
/// locations and bezier curve offsets in every format this crate touches.
///
/// # Examples
///
/// ```
/// # use mindmap_core::geometry::Point;
/// let p = Point::new(10.0, -20.5);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), -20.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }
}

/// Represents the dimensions of rendered content with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a copy of this size with `amount` added to the height.
    pub fn grow_height(self, amount: f32) -> Self {
        Self {
            width: self.width,
            height: self.height + amount,
        }
    }
}
