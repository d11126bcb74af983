//! A single finding and the spans it points at.

use crate::kind::{DiagnosticCode, Severity};
use ipstub_source::Span;
use serde::{Deserialize, Serialize};

/// How a label is underlined.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// `^^^` under the offending text.
    Primary,
    /// `---` under related text, such as an earlier declaration.
    Secondary,
}

/// Message attached to a span.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Annotated text.
    pub span: Span,
    /// Shown after the underline.
    pub message: String,
    /// Underline style.
    pub style: LabelStyle,
}

impl Label {
    /// A `^^^` label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::styled(LabelStyle::Primary, span, message)
    }

    /// A `---` label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::styled(LabelStyle::Secondary, span, message)
    }

    fn styled(style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style,
        }
    }
}

/// One reported problem.
///
/// Built with [`Diagnostic::error`] or [`Diagnostic::warning`] and then
/// decorated with the `with_*` methods.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious it is.
    pub severity: Severity,
    /// Stable code such as `E101`.
    pub code: DiagnosticCode,
    /// One-line summary.
    pub message: String,
    /// Location of the problem, or [`Span::DUMMY`].
    pub primary_span: Span,
    /// Annotated spans.
    pub labels: Vec<Label>,
    /// Printed as `= note: ...`.
    pub notes: Vec<String>,
    /// Printed as `= help: ...`.
    pub help: Vec<String>,
}

impl Diagnostic {
    /// An error at `span`.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message.into(), span)
    }

    /// A warning at `span`.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message.into(), span)
    }

    fn with_severity(severity: Severity, code: DiagnosticCode, message: String, span: Span) -> Self {
        Self {
            severity,
            code,
            message,
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// The first primary label, if any.
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.iter().find(|l| l.style == LabelStyle::Primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Category;

    const E104: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);

    #[test]
    fn decorated_error() {
        let diag = Diagnostic::error(E104, "invalid vector range `(x downto 0)`", Span::DUMMY)
            .with_label(Label::secondary(Span::DUMMY, "port declared here"))
            .with_label(Label::primary(Span::DUMMY, "bounds must be integers"))
            .with_note("ranges look like `(<int> downto <int>)`")
            .with_help("replace generics with literal bounds");

        assert!(diag.severity.is_error());
        assert_eq!(diag.code.to_string(), "E104");
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.primary_label().unwrap().message, "bounds must be integers");
        assert_eq!(diag.notes, ["ranges look like `(<int> downto <int>)`"]);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn plain_warning_has_no_extras() {
        let code = DiagnosticCode::new(Category::Warning, 101);
        let diag = Diagnostic::warning(code, "duplicate port `reset`", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.primary_label().is_none());
        assert!(diag.notes.is_empty() && diag.help.is_empty());
    }

    #[test]
    fn json_fields() {
        let diag = Diagnostic::error(E104, "bad range", Span::DUMMY);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "bad range");
        assert_eq!(json["code"]["number"], 104);
    }
}
