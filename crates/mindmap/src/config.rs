//! Configuration types for mind map conversion.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining graph and measurement settings.
//! - [`GraphConfig`] - Pinning ratios and node sizing for the graph shape.
//! - [`MeasureConfig`] - Font used to measure node markup.
//!
//! # Example
//!
//! ```
//! # use mindmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.graph().style_class(), "mindmap-node");
//! ```

use serde::Deserialize;

use crate::error::MindmapError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Graph conversion section.
    #[serde(default)]
    graph: GraphConfig,

    /// Text measurement section.
    #[serde(default)]
    measure: MeasureConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `graph` - Pinning and sizing options for the graph shape.
    /// * `measure` - Font settings for measuring node markup.
    pub fn new(graph: GraphConfig, measure: MeasureConfig) -> Self {
        Self { graph, measure }
    }

    /// Returns the graph configuration.
    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    /// Returns the measurement configuration.
    pub fn measure(&self) -> &MeasureConfig {
        &self.measure
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<(), MindmapError> {
        self.graph.validate()?;
        self.measure.validate()
    }
}

/// Graph conversion options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Probability that a node is pinned to its document location.
    node_fixed_ratio: f64,

    /// Probability that a link keeps its curve offset.
    link_fixed_ratio: f64,

    /// Added to the measured height of every node.
    height_padding: f32,

    /// Style class under which node markup is measured.
    style_class: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_fixed_ratio: 0.85,
            link_fixed_ratio: 0.75,
            height_padding: 4.0,
            style_class: String::from("mindmap-node"),
        }
    }
}

impl GraphConfig {
    /// Sets the node pinning probability.
    pub fn with_node_fixed_ratio(mut self, ratio: f64) -> Self {
        self.node_fixed_ratio = ratio;
        self
    }

    /// Sets the link pinning probability.
    pub fn with_link_fixed_ratio(mut self, ratio: f64) -> Self {
        self.link_fixed_ratio = ratio;
        self
    }

    /// Sets the height padding.
    pub fn with_height_padding(mut self, padding: f32) -> Self {
        self.height_padding = padding;
        self
    }

    pub fn node_fixed_ratio(&self) -> f64 {
        self.node_fixed_ratio
    }

    pub fn link_fixed_ratio(&self) -> f64 {
        self.link_fixed_ratio
    }

    pub fn height_padding(&self) -> f32 {
        self.height_padding
    }

    pub fn style_class(&self) -> &str {
        &self.style_class
    }

    fn validate(&self) -> Result<(), MindmapError> {
        check_ratio("graph.node_fixed_ratio", self.node_fixed_ratio)?;
        check_ratio("graph.link_fixed_ratio", self.link_fixed_ratio)?;
        if !self.height_padding.is_finite() || self.height_padding < 0.0 {
            return Err(MindmapError::Config(format!(
                "graph.height_padding must be a non-negative number, got {}",
                self.height_padding
            )));
        }
        if self.style_class.is_empty() {
            return Err(MindmapError::Config(
                "graph.style_class must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_ratio(key: &str, ratio: f64) -> Result<(), MindmapError> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(MindmapError::Config(format!(
            "{key} must be between 0 and 1, got {ratio}"
        )))
    }
}

/// Font settings used to measure node markup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    font_family: String,

    /// Font size in points.
    font_size: u16,

    /// Line height as a multiple of the font size.
    line_height: f32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 14,
            line_height: 1.15,
        }
    }
}

impl MeasureConfig {
    /// Creates a measurement configuration.
    pub fn new(font_family: impl Into<String>, font_size: u16, line_height: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            line_height,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    fn validate(&self) -> Result<(), MindmapError> {
        if self.font_size == 0 {
            return Err(MindmapError::Config(
                "measure.font_size must be greater than zero".to_string(),
            ));
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(MindmapError::Config(format!(
                "measure.line_height must be a positive number, got {}",
                self.line_height
            )));
        }
        Ok(())
    }
}
