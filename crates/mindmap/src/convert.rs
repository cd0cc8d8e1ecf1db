//! Conversion of raw documents into the two output shapes.
//!
//! - [`archive_map`] produces the deterministic, text-keyed archival shape.
//! - [`GraphConverter`] produces the identifier-keyed force-graph shape,
//!   measuring node markup and randomly pinning nodes and links.

mod archival;
mod graph;

pub use archival::archive_map;
pub use graph::{GraphConverter, PinningPolicy};
