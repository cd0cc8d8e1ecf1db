//! The core diagnostic type for the mind map error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code and help text.

use std::fmt;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message about a document.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message naming the offending element
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E200]: connection references unknown node `C3`
///    = help: connections may only join top-level nodes of the same map
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use mindmap_parser::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("connection references unknown node `7`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_help("check the connection endpoints");
    /// assert_eq!(diag.to_string(), "error[E200]: connection references unknown node `7`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
