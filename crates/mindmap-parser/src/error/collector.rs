//! Collector for accumulating diagnostics during a conversion.
//!
//! The [`DiagnosticCollector`] lets a stage report every broken reference of
//! a document at once instead of failing on the first one.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a conversion stage.
///
/// # Example
///
/// ```
/// # use mindmap_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode};
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::error("connection references unknown node `4`")
///         .with_code(ErrorCode::E200),
/// );
/// collector.emit(
///     Diagnostic::error("connection references unknown node `5`")
///         .with_code(ErrorCode::E200),
/// );
///
/// let err = collector.finish().unwrap_err();
/// assert_eq!(err.diagnostics().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns the diagnostics emitted so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are no errors, logs the warnings and returns `Ok(())`.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(diagnostic:% = diagnostic; "Conversion warning");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_emit_warning_finish_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("test warning"));
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_finish_with_errors_keeps_all() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error").with_code(ErrorCode::E200));
        collector.emit(Diagnostic::warning("test warning"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }
}
