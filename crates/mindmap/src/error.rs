//! Error types for mind map conversion.
//!
//! [`MindmapError`] wraps every failure a conversion can hit, from reading
//! the document to measuring node markup.

use std::io;

use thiserror::Error;

use mindmap_core::measure::MeasureError;
use mindmap_parser::error::ParseError;

/// The main error type for mind map operations.
///
/// # Diagnostic Variants
///
/// The `Convert` variant carries every diagnostic found in the document, so
/// callers can report all broken references at once.
#[derive(Debug, Error)]
pub enum MindmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("{0}")]
    Convert(#[from] ParseError),

    #[error("Measurement error: {0}")]
    Measure(#[from] MeasureError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialize(serde_json::Error),
}
