//! Line scanner for the entity declarations written by the IP export tool.
//!
//! The accepted subset is one port per line between `entity <Name> is` and
//! `end <Name>;`:
//!
//! ```text
//! entity Name is
//!     port (
//!         clk      : in  std_logic;
//!         data_out : out std_logic_vector(7 downto 0);
//!     );
//! end Name;
//! ```
//!
//! Only the first entity in the text is read. The only range keywords
//! recognized are `to` and `downto`.

use std::collections::HashMap;

use crate::error::{ParseError, ParseWarning, SourceLine};
use crate::naming::NamingRule;
use crate::port::{
    Direction, Entity, EntityPortTable, PortDescriptor, PortShape, VectorOrder, VectorRange,
};

/// Knobs for [`scan_entity`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rule used to fill each port's local name.
    pub naming: NamingRule,
    /// Skip malformed declaration lines with a warning instead of failing.
    pub legacy: bool,
}

/// Everything a scan produced: the entity (if a header was found) plus all
/// errors and warnings, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// The entity, possibly partial when `errors` is not empty.
    pub entity: Option<Entity>,
    /// Errors, in source order. Empty on success.
    pub errors: Vec<ParseError>,
    /// Non-fatal findings, in source order.
    pub warnings: Vec<ParseWarning>,
}

impl ParseReport {
    /// Returns `true` if any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Converts the report into the entity, or the first error.
    pub fn into_result(self) -> Result<Entity, ParseError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        self.entity.ok_or(ParseError::NoEntityFound)
    }
}

/// Parses the first entity declaration in `text` with default options.
///
/// Fails on the first error; warnings are dropped. Use [`scan_entity`] to see
/// every finding.
pub fn parse_entity(text: &str) -> Result<Entity, ParseError> {
    scan_entity(text, &ParseOptions::default()).into_result()
}

/// Scans `text` for the first entity declaration and collects every finding.
///
/// Malformed lines do not stop the scan, so one pass reports all of them.
pub fn scan_entity(text: &str, options: &ParseOptions) -> ParseReport {
    EntityScanner::new(options).run(text)
}

/// A line of the input without its terminator.
struct Line<'a> {
    number: u32,
    start: usize,
    text: &'a str,
}

impl Line<'_> {
    /// The trimmed content together with its location.
    fn source_line(&self) -> SourceLine {
        let trimmed_start = self.text.len() - self.text.trim_start().len();
        let trimmed = self.text.trim();
        let start = self.start + trimmed_start;
        SourceLine {
            number: self.number,
            span: start..start + trimmed.len(),
            text: trimmed.to_string(),
        }
    }
}

fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let start = offset;
            offset += raw.len();
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            Line {
                number: (idx + 1) as u32,
                start,
                text,
            }
        })
}

/// Why a vector range could not be read.
enum RangeProblem {
    Keyword(String),
    Shape(String),
}

struct EntityScanner<'o> {
    options: &'o ParseOptions,
    header: Option<(String, SourceLine)>,
    ports: EntityPortTable,
    declared_at: HashMap<String, SourceLine>,
    errors: Vec<ParseError>,
    warnings: Vec<ParseWarning>,
}

impl<'o> EntityScanner<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            header: None,
            ports: EntityPortTable::new(),
            declared_at: HashMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn run(mut self, text: &str) -> ParseReport {
        let mut terminated = false;
        let mut end_marker = String::new();

        for line in lines(text) {
            if self.header.is_none() {
                if let Some(name) = entity_header(line.text) {
                    log::trace!("entity `{name}` starts at line {}", line.number);
                    end_marker = format!("end {name};");
                    self.header = Some((name.to_string(), line.source_line()));
                }
                continue;
            }
            if line.text.trim_end() == end_marker {
                log::trace!("entity ends at line {}", line.number);
                terminated = true;
                break;
            }
            self.scan_line(&line);
        }

        let entity = match self.header {
            Some((name, header_line)) => {
                if !terminated {
                    self.warnings.push(ParseWarning::UnterminatedEntity {
                        name: name.clone(),
                        line: header_line,
                    });
                }
                Some(Entity {
                    name,
                    ports: self.ports,
                })
            }
            None => {
                self.errors.push(ParseError::NoEntityFound);
                None
            }
        };

        ParseReport {
            entity,
            errors: self.errors,
            warnings: self.warnings,
        }
    }

    fn scan_line(&mut self, line: &Line<'_>) {
        let trimmed = strip_comment(line.text).trim();
        if is_structural(trimmed) {
            log::debug!("line {}: skipping `{trimmed}`", line.number);
            return;
        }

        let Some((name, port_type)) = split_declaration(trimmed) else {
            self.malformed(line);
            return;
        };

        let direction = if port_type.split_whitespace().any(|tok| tok == "in") {
            Direction::In
        } else {
            Direction::Out
        };

        let shape = if port_type.contains("std_logic_vector") {
            match vector_range(port_type) {
                Ok(range) => PortShape::Vector(range),
                Err(problem) => {
                    let line = line.source_line();
                    self.errors.push(match problem {
                        RangeProblem::Keyword(keyword) => {
                            ParseError::UnrecognizedRangeKeyword { keyword, line }
                        }
                        RangeProblem::Shape(range) => ParseError::InvalidVectorRange { range, line },
                    });
                    return;
                }
            }
        } else {
            PortShape::Scalar
        };

        let mut port = PortDescriptor::unresolved(name, direction, shape);
        port.local_name = self.options.naming.resolve(&port);
        log::debug!(
            "line {}: port `{}` -> `{}` ({}, {})",
            line.number,
            port.declared_name,
            port.local_name,
            port.direction,
            port.type_name()
        );

        let here = line.source_line();
        if self.options.naming.is_untagged_marker(name) {
            self.warnings.push(ParseWarning::UntaggedMarker {
                name: name.to_string(),
                marker: self.options.naming.marker.clone(),
                line: here.clone(),
            });
        }
        match self.declared_at.get(name) {
            Some(first) => self.warnings.push(ParseWarning::DuplicatePort {
                name: name.to_string(),
                first: first.clone(),
                line: here,
            }),
            None => {
                self.declared_at.insert(name.to_string(), here);
            }
        }
        self.ports.insert(name.to_string(), port);
    }

    fn malformed(&mut self, line: &Line<'_>) {
        let line = line.source_line();
        if self.options.legacy {
            log::debug!("line {}: skipping malformed declaration (legacy mode)", line.number);
            self.warnings.push(ParseWarning::SkippedDeclaration { line });
        } else {
            self.errors.push(ParseError::MalformedDeclaration { line });
        }
    }
}

/// Returns the entity name if `line` starts, in column 1, with `entity`
/// followed by whitespace and a name.
fn entity_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("entity")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace().next()
}

/// Drops a trailing `--` comment.
fn strip_comment(text: &str) -> &str {
    text.find("--").map_or(text, |start| &text[..start])
}

/// Lines inside the block that carry no port.
fn is_structural(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.starts_with("--")
        || trimmed == "port ("
        || trimmed == "port("
        || trimmed == ");"
}

/// Splits `<name> : <type>` on its only colon.
///
/// Returns `None` for zero or several colons, an empty name, or an empty
/// port type.
fn split_declaration(trimmed: &str) -> Option<(&str, &str)> {
    let mut parts = trimmed.split(':');
    let (Some(name), Some(port_type), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    let name = name.trim();
    let port_type = port_type.trim();
    if name.is_empty() || port_type.is_empty() {
        return None;
    }
    Some((name, port_type))
}

/// Reads `<left> <keyword> <right>` from the innermost parentheses of a
/// `std_logic_vector(...)` port type.
fn vector_range(port_type: &str) -> Result<VectorRange, RangeProblem> {
    let open = port_type
        .rfind('(')
        .ok_or_else(|| RangeProblem::Shape(String::new()))?;
    let after = &port_type[open + 1..];
    let close = after
        .find(')')
        .ok_or_else(|| RangeProblem::Shape(after.trim().to_string()))?;
    let inner = after[..close].trim();

    let tokens: Vec<&str> = inner.split_whitespace().collect();
    let [left, keyword, right] = tokens.as_slice() else {
        return Err(RangeProblem::Shape(inner.to_string()));
    };
    let order =
        VectorOrder::from_keyword(keyword).ok_or_else(|| RangeProblem::Keyword(keyword.to_string()))?;
    let (Ok(left), Ok(right)) = (left.parse::<u32>(), right.parse::<u32>()) else {
        return Err(RangeProblem::Shape(inner.to_string()));
    };
    Ok(VectorRange { order, left, right })
}
