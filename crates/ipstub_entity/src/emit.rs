//! Turning scan findings into diagnostics against a loaded source file.

use crate::error::{ParseError, ParseWarning, SourceLine};
use crate::parser::{scan_entity, ParseOptions};
use crate::port::Entity;
use ipstub_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use ipstub_source::{FileId, SourceDb, Span};

/// Port line is not `<name> : <direction> <type>`.
pub const MALFORMED_DECLARATION: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// No `entity <name> is` header.
pub const NO_ENTITY: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// Range keyword other than `to`/`downto`.
pub const RANGE_KEYWORD: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
/// Vector range missing or not `<int> <keyword> <int>`.
pub const INVALID_RANGE: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
/// Port name declared twice.
pub const DUPLICATE_PORT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);
/// Missing `end <name>;`.
pub const UNTERMINATED_ENTITY: DiagnosticCode = DiagnosticCode::new(Category::Warning, 102);
/// Malformed line skipped in legacy mode.
pub const SKIPPED_DECLARATION: DiagnosticCode = DiagnosticCode::new(Category::Warning, 103);
/// Marker present without a full `<marker>_<NN>_<name>` tag.
pub const UNTAGGED_MARKER: DiagnosticCode = DiagnosticCode::new(Category::Warning, 104);

/// Parses the entity in a loaded file, emitting every finding into `sink`.
///
/// Returns `None` when any error was found; the diagnostics say why.
pub fn parse_file(
    file: FileId,
    source_db: &SourceDb,
    sink: &DiagnosticSink,
    options: &ParseOptions,
) -> Option<Entity> {
    let report = scan_entity(&source_db.get_file(file).content, options);
    for warning in &report.warnings {
        sink.emit(warning_diagnostic(file, warning));
    }
    for error in &report.errors {
        sink.emit(error_diagnostic(file, error));
    }
    if report.has_errors() {
        return None;
    }
    report.entity
}

fn span_of(file: FileId, line: &SourceLine) -> Span {
    Span::from_range(file, line.span.clone())
}

/// Builds the diagnostic for a parse error.
pub fn error_diagnostic(file: FileId, error: &ParseError) -> Diagnostic {
    match error {
        ParseError::MalformedDeclaration { line } => {
            let span = span_of(file, line);
            Diagnostic::error(
                MALFORMED_DECLARATION,
                format!("malformed port declaration `{}`", line.text),
                span,
            )
            .with_label(Label::primary(span, "expected `<name> : <direction> <type>`"))
            .with_help("each port must sit on its own line with exactly one `:`")
            .with_help("rerun with `--legacy` to skip lines like this one")
        }
        ParseError::NoEntityFound => Diagnostic::error(NO_ENTITY, error.to_string(), Span::DUMMY)
            .with_note("the declaration must start with `entity <name> is` in column 1")
            .with_help("check that the file is an IP export wrapper"),
        ParseError::UnrecognizedRangeKeyword { keyword, line } => {
            let span = span_of(file, line);
            Diagnostic::error(
                RANGE_KEYWORD,
                format!("unrecognized vector range keyword `{keyword}`"),
                span,
            )
            .with_label(Label::primary(span, "expected `to` or `downto`"))
        }
        ParseError::InvalidVectorRange { range, line } => {
            let span = span_of(file, line);
            let message = if range.is_empty() {
                "vector port has no range".to_string()
            } else {
                format!("invalid vector range `{range}`")
            };
            Diagnostic::error(INVALID_RANGE, message, span)
                .with_label(Label::primary(span, "expected `(<int> downto <int>)` or `(<int> to <int>)`"))
                .with_note("range bounds must be integer literals")
        }
    }
}

/// Builds the diagnostic for a parse warning.
pub fn warning_diagnostic(file: FileId, warning: &ParseWarning) -> Diagnostic {
    match warning {
        ParseWarning::DuplicatePort { name, first, line } => {
            let span = span_of(file, line);
            Diagnostic::warning(DUPLICATE_PORT, format!("duplicate port `{name}`"), span)
                .with_label(Label::primary(span, "this declaration replaces the first"))
                .with_label(Label::secondary(span_of(file, first), "first declared here"))
                .with_note("the port keeps its original position in the port list")
        }
        ParseWarning::UnterminatedEntity { name, line } => {
            let span = span_of(file, line);
            Diagnostic::warning(UNTERMINATED_ENTITY, warning.to_string(), span)
                .with_label(Label::primary(span, "entity starts here"))
                .with_note(format!("ports were read up to the end of the file; expected `end {name};`"))
        }
        ParseWarning::SkippedDeclaration { line } => {
            let span = span_of(file, line);
            Diagnostic::warning(
                SKIPPED_DECLARATION,
                format!("skipped malformed port declaration `{}`", line.text),
                span,
            )
            .with_label(Label::primary(span, "not a port declaration"))
        }
        ParseWarning::UntaggedMarker { name, marker, line } => {
            let span = span_of(file, line);
            Diagnostic::warning(
                UNTAGGED_MARKER,
                format!("port `{name}` contains `{marker}` but no `{marker}_<NN>_<name>` tag"),
                span,
            )
            .with_label(Label::primary(span, "local name falls back to the lower-cased port name"))
        }
    }
}
