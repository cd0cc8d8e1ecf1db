//! Dimension measurement seam.
//!
//! Graph conversion needs to know how tall a node's rendered markup will be.
//! Measuring is a text-layout concern outside the conversion core, so it is
//! expressed as the [`Measure`] trait and injected by the caller.
//!
//! # Example
//!
//! ```
//! # use mindmap_core::{geometry::Size, measure::{Measure, MeasureConstraints, MeasureError}};
//! struct FixedLine;
//!
//! impl Measure for FixedLine {
//!     fn measure(
//!         &self,
//!         _markup: &str,
//!         constraints: &MeasureConstraints,
//!         _style_class: &str,
//!     ) -> Result<Size, MeasureError> {
//!         let width = constraints.max_width().unwrap_or(100.0) as f32;
//!         Ok(Size::new(width, 18.0))
//!     }
//! }
//!
//! let size = FixedLine
//!     .measure("<p>Rust</p>", &MeasureConstraints::new(Some(80.0)), "mindmap-node")
//!     .unwrap();
//! assert_eq!(size.height(), 18.0);
//! ```

use thiserror::Error;

use crate::geometry::Size;

/// Errors reported by a [`Measure`] implementation.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("unknown style class `{0}`")]
    UnknownStyle(String),

    #[error("text layout failed: {0}")]
    Layout(String),
}

/// Layout constraints passed alongside the markup being measured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasureConstraints {
    max_width: Option<f64>,
}

impl MeasureConstraints {
    pub fn new(max_width: Option<f64>) -> Self {
        Self { max_width }
    }

    /// Returns the width content must wrap at, if any.
    pub fn max_width(&self) -> Option<f64> {
        self.max_width
    }
}

/// Measures the rendered size of a markup fragment.
///
/// Implementations must be safe to call repeatedly for the same input; the
/// graph converter calls `measure` exactly once per node.
pub trait Measure {
    /// Returns the size `markup` occupies when rendered with `style_class`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError`] when the markup cannot be laid out. Errors
    /// are passed back to the caller of the conversion unchanged.
    fn measure(
        &self,
        markup: &str,
        constraints: &MeasureConstraints,
        style_class: &str,
    ) -> Result<Size, MeasureError>;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(
        &self,
        markup: &str,
        constraints: &MeasureConstraints,
        style_class: &str,
    ) -> Result<Size, MeasureError> {
        (**self).measure(markup, constraints, style_class)
    }
}
