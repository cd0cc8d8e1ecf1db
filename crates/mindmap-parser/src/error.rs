//! Error and diagnostic system for mind map conversion.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! A [`Diagnostic`] describes one problem found in a document. Conversions
//! report all problems of a document together, wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use mindmap_parser::error::{Diagnostic, ErrorCode, ParseError};
//! let err: ParseError = Diagnostic::error("connection references unknown node `3`")
//!     .with_code(ErrorCode::E200)
//!     .into();
//! assert_eq!(err.to_string(), "error[E200]: connection references unknown node `3`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
