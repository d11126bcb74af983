//! Diagnostic rendering backends.

use crate::diagnostic::{Diagnostic, Label, LabelStyle};
use crate::kind::Severity;
use colored::Colorize;
use ipstub_source::{SourceDb, Span};

/// Formats diagnostics into output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// error[E101]: malformed port declaration `clk in std_logic;`
///   --> NiFpgaIPWrapper_top.vhd:4:9
///   |
/// 4 |         clk in std_logic;
///   |         ^^^^^^^^^^^^^^^^^ expected `<name> : <direction> <type>`
///   |
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let tag = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return format!("{tag}: {}", diag.message);
        }
        let tag = match diag.severity {
            Severity::Error => tag.red().bold(),
            Severity::Warning => tag.yellow().bold(),
            Severity::Note => tag.cyan().bold(),
        };
        format!("{tag}: {}", diag.message.bold())
    }

    fn snippet(&self, out: &mut String, span: Span, label: Option<&Label>, source_db: &SourceDb) {
        let file = source_db.get_file(span.file);
        let (line, col) = file.position(span.start);
        let line_num = line.to_string();
        let padding = " ".repeat(line_num.len());
        let line_content = file.line(line).unwrap_or_default();

        let (marker, message) = match label {
            Some(l) if l.style == LabelStyle::Secondary => ('-', format!(" {}", l.message)),
            Some(l) => ('^', format!(" {}", l.message)),
            None => ('^', String::new()),
        };
        let underline = std::iter::repeat(marker)
            .take(span.len().max(1) as usize)
            .collect::<String>();
        let col_padding = " ".repeat((col as usize).saturating_sub(1));

        out.push_str(&format!("  --> {}\n", source_db.locate(span)));
        out.push_str(&format!("{padding} |\n"));
        out.push_str(&format!("{line_num} | {line_content}\n"));
        out.push_str(&format!("{padding} | {col_padding}{underline}{message}\n"));
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = self.header(diag);
        out.push('\n');

        if !diag.primary_span.is_dummy() {
            self.snippet(&mut out, diag.primary_span, diag.primary_label(), source_db);
        }

        for label in diag
            .labels
            .iter()
            .filter(|l| l.style == LabelStyle::Secondary && !l.span.is_dummy())
        {
            self.snippet(&mut out, label.span, Some(label), source_db);
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
