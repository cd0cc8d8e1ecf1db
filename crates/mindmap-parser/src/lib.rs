//! # Mind Map Parser
//!
//! Content extraction for mind map markup. This crate turns the markup
//! stored in node titles and notes into the values the output shapes need:
//!
//! - [`markup`] - display text, hyperlink targets, style stripping
//! - [`emoji`] - emoji image conversion and category recognition
//! - [`error`] - diagnostics reported by the conversion stages
//!
//! ## Usage
//!
//! ```
//! # use mindmap_core::{document::RawNode, geometry::Point};
//! # use mindmap_parser::parse_node;
//! let raw = RawNode::new("1", "<p>Borrow checker</p>", Point::new(0.0, 0.0))
//!     .with_note("<p>Read chapter 4</p>");
//!
//! let node = parse_node(&raw);
//! assert_eq!(node.text(), "Borrow checker");
//! assert_eq!(node.note(), Some("Read chapter 4"));
//! ```

pub mod emoji;
pub mod error;
pub mod markup;

mod node;

pub use emoji::{convert_emojis, extract_category};
pub use markup::{extract_text, extract_url, strip_style_attributes};
pub use node::{connection_text, parse_node};
