//! Mindmap - Flattens mind map exports into archival and force-graph shapes.
//!
//! A mind map export is a forest of titled, positioned nodes plus
//! connections between top-level nodes. This crate turns one export into:
//!
//! - an archival map keyed by display text, for storage and search
//! - a graph map keyed by identifier, with measured node sizes and randomly
//!   pinned coordinates, for force-directed rendering

pub mod config;
pub mod convert;
pub mod flatten;
pub mod ids;
pub mod resolve;
pub mod text;

mod error;

pub use mindmap_core::{archive, category, document, geometry, graph, identifier, measure};

pub use error::MindmapError;

use log::{debug, info};
use rand::Rng;

use config::AppConfig;
use convert::GraphConverter;
use document::RawDocument;
use measure::Measure;
use text::TextMeasurer;

/// Builder for converting mind map documents.
///
/// Holds the application configuration and exposes each conversion stage.
///
/// # Examples
///
/// ```
/// use mindmap::{MapConverter, config::AppConfig};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let json = r#"{
///     "title": "Rust",
///     "nodes": [
///         { "id": 1, "title": { "text": "<p>Ownership</p>" }, "location": { "x": 0, "y": 0 } },
///         { "id": 2, "title": { "text": "<p>Borrowing</p>" }, "location": { "x": 50, "y": 0 } }
///     ],
///     "connections": [
///         { "startNodeID": 1, "endNodeID": 2, "wayPointOffset": { "x": 0, "y": 0 } }
///     ]
/// }"#;
///
/// let converter = MapConverter::new(AppConfig::default());
/// let document = converter.load(json).expect("Failed to load");
///
/// let archive = converter.archive(&document).expect("Failed to archive");
/// assert_eq!(archive.connections()[0].target(), "Borrowing");
///
/// let measurer = converter.measurer();
/// let graph = converter
///     .graph(&document, &measurer, &mut StdRng::seed_from_u64(1))
///     .expect("Failed to convert");
/// assert_eq!(graph.nodes().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MapConverter {
    config: AppConfig,
}

impl MapConverter {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including pinning and font settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode a mind map export.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Document`] when the text is not a mind map
    /// export.
    pub fn load(&self, json: &str) -> Result<RawDocument, MindmapError> {
        info!("Loading document");
        let document = RawDocument::from_json(json)?;
        debug!(
            title = document.title(),
            nodes = document.node_count(),
            connections = document.connections().len();
            "Document loaded"
        );
        Ok(document)
    }

    /// Convert a document into its archival shape.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Convert`] listing every duplicate top-level
    /// identifier and unknown connection endpoint.
    pub fn archive(&self, document: &RawDocument) -> Result<archive::ArchivedMap, MindmapError> {
        Ok(convert::archive_map(document)?)
    }

    /// Convert a document into its graph shape.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to convert
    /// * `measurer` - Measures node markup
    /// * `rng` - Source of the pinning decisions; seed it for reproducible output
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Measure`] if a node cannot be measured.
    pub fn graph<M, R>(
        &self,
        document: &RawDocument,
        measurer: &M,
        rng: &mut R,
    ) -> Result<graph::GraphMap, MindmapError>
    where
        M: Measure + ?Sized,
        R: Rng + ?Sized,
    {
        GraphConverter::new(measurer, self.config.graph()).convert(document, rng)
    }

    /// Replace node identifiers with display texts.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Convert`] if the document reuses an identifier
    /// or a connection names an unknown node.
    pub fn rewrite_ids(&self, document: RawDocument) -> Result<RawDocument, MindmapError> {
        Ok(ids::rewrite_ids(document)?)
    }

    /// Create a text measurer for the configured node style.
    pub fn measurer(&self) -> TextMeasurer {
        TextMeasurer::from_config(&self.config)
    }
}
