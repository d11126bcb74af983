//! Shared collector for findings.

use crate::diagnostic::Diagnostic;
use crate::kind::Severity;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Collects diagnostics in emission order.
///
/// `emit` takes `&self`; the parser and the command driving it hold the same
/// sink by shared reference.
#[derive(Default)]
pub struct DiagnosticSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        log::trace!("{}[{}]: {}", diag.severity, diag.code, diag.message);
        self.entries().push(diag);
    }

    /// `true` once any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Recorded errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Recorded warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Removes and returns everything recorded so far.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries())
    }

    /// A copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries().clone()
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
