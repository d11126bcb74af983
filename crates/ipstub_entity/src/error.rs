//! Errors and warnings produced while scanning an entity declaration.

use std::fmt;
use std::ops::Range;

/// A source line referenced by an error or warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-indexed line number.
    pub number: u32,
    /// Byte range of the trimmed line content within the scanned text.
    pub span: Range<usize>,
    /// The trimmed line content.
    pub text: String,
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: `{}`", self.number, self.text)
    }
}

/// A problem that prevents a usable port table from being produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A port-block line that is not `<name> : <direction> <type>` with
    /// exactly one colon.
    #[error("malformed port declaration at {line}")]
    MalformedDeclaration {
        /// The offending line.
        line: SourceLine,
    },

    /// No `entity <name>` line was found.
    #[error("no entity declaration found")]
    NoEntityFound,

    /// A vector range used a keyword other than `to` or `downto`.
    #[error("unrecognized vector range keyword `{keyword}` at {line}")]
    UnrecognizedRangeKeyword {
        /// The keyword as written.
        keyword: String,
        /// The offending line.
        line: SourceLine,
    },

    /// A vector range that is missing or is not `<int> <keyword> <int>`.
    #[error("invalid vector range `{range}` at {line}")]
    InvalidVectorRange {
        /// The text found between the range parentheses (empty if absent).
        range: String,
        /// The offending line.
        line: SourceLine,
    },
}

impl ParseError {
    /// The line the error points at, if any.
    pub fn line(&self) -> Option<&SourceLine> {
        match self {
            ParseError::MalformedDeclaration { line }
            | ParseError::UnrecognizedRangeKeyword { line, .. }
            | ParseError::InvalidVectorRange { line, .. } => Some(line),
            ParseError::NoEntityFound => None,
        }
    }
}

/// Suspicious input that is still turned into a port table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    /// A declared name appeared twice; the later declaration replaced the
    /// earlier one.
    #[error("duplicate port `{name}` at {line}")]
    DuplicatePort {
        /// The repeated declared name.
        name: String,
        /// Where it was first declared.
        first: SourceLine,
        /// The replacing declaration.
        line: SourceLine,
    },

    /// The `end <name>;` line never appeared.
    #[error("entity `{name}` is not terminated by `end {name};`")]
    UnterminatedEntity {
        /// The entity name.
        name: String,
        /// The `entity` header line.
        line: SourceLine,
    },

    /// A malformed declaration skipped in legacy mode.
    #[error("skipped malformed port declaration at {line}")]
    SkippedDeclaration {
        /// The skipped line.
        line: SourceLine,
    },

    /// A port name carries the naming marker but not a complete tag, so it
    /// keeps its plain lower-cased name.
    #[error("port `{name}` contains marker `{marker}` without a `{marker}_<NN>_<name>` tag")]
    UntaggedMarker {
        /// The declared name.
        name: String,
        /// The marker token.
        marker: String,
        /// The declaring line.
        line: SourceLine,
    },
}

impl ParseWarning {
    /// The line the warning points at.
    pub fn line(&self) -> &SourceLine {
        match self {
            ParseWarning::DuplicatePort { line, .. }
            | ParseWarning::UnterminatedEntity { line, .. }
            | ParseWarning::SkippedDeclaration { line }
            | ParseWarning::UntaggedMarker { line, .. } => line,
        }
    }
}
