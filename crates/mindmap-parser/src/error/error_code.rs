//! Error codes for the mind map diagnostic system.
//!
//! Codes are grouped by the stage that reports them:
//! - `E2xx` - Document integrity errors found while flattening and resolving

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Integrity Errors (E2xx)
    // =========================================================================
    /// Unknown connection endpoint.
    ///
    /// A connection references a node identifier that is not a top-level
    /// node of the same document.
    E200,

    /// Duplicate node identifier.
    ///
    /// Two top-level nodes share the same identifier, so connections to that
    /// identifier cannot be resolved unambiguously.
    E201,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E200 => "unknown connection endpoint",
            ErrorCode::E201 => "duplicate node identifier",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
