//! Mapping exported port names to testbench-local signal names.
//!
//! The export tool flags auto-generated control and indicator ports with a
//! `<marker>_<NN>_<identifier>` name, e.g. `ctrlind_15_OrderBook_Command_Type`.
//! Such ports get a direction prefix instead of the tag
//! (`in_ip_orderbook_command_type`). Every other port (clock, reset, enables)
//! keeps its declared name, lower-cased.

use crate::port::{Direction, PortDescriptor};
use serde::{Deserialize, Serialize};

/// The marker token and direction prefixes used to build local names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    /// Token that starts a tagged port name.
    pub marker: String,
    /// Prefix for tagged ports driven by the testbench.
    pub input_prefix: String,
    /// Prefix for tagged ports driven by the unit.
    pub output_prefix: String,
}

impl Default for NamingRule {
    fn default() -> Self {
        Self {
            marker: "ctrlind".to_string(),
            input_prefix: "in_ip_".to_string(),
            output_prefix: "out_ip_".to_string(),
        }
    }
}

impl NamingRule {
    /// Resolves the testbench-local name of a port.
    ///
    /// Only the declared name and direction are read. The result is always
    /// lower-case.
    pub fn resolve(&self, port: &PortDescriptor) -> String {
        match self.tagged_identifier(&port.declared_name) {
            Some(ident) => {
                let prefix = match port.direction {
                    Direction::In => &self.input_prefix,
                    Direction::Out => &self.output_prefix,
                };
                format!("{prefix}{ident}").to_lowercase()
            }
            None => port.declared_name.to_lowercase(),
        }
    }

    /// Returns the identifier of the first `<marker>_<NN>_<identifier>` match
    /// in `name`, with the two-digit tag dropped.
    ///
    /// The identifier is the longest run of ASCII alphanumerics and `_`
    /// following the tag, and must not be empty.
    pub fn tagged_identifier<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.marker.is_empty() {
            return None;
        }
        name.match_indices(self.marker.as_str())
            .find_map(|(idx, marker)| {
                let rest = name[idx + marker.len()..].strip_prefix('_')?;
                match rest.as_bytes() {
                    [d0, d1, b'_', ..] if d0.is_ascii_digit() && d1.is_ascii_digit() => {}
                    _ => return None,
                }
                let ident = &rest[3..];
                let end = ident
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(ident.len());
                (end > 0).then(|| &ident[..end])
            })
    }

    /// Returns `true` when `name` contains the marker token but no complete
    /// `<marker>_<NN>_<identifier>` match, so it falls back to the plain
    /// lower-cased name.
    pub fn is_untagged_marker(&self, name: &str) -> bool {
        !self.marker.is_empty()
            && name.contains(self.marker.as_str())
            && self.tagged_identifier(name).is_none()
    }
}

/// Resolves a port's local name with the default [`NamingRule`].
pub fn resolve_name(port: &PortDescriptor) -> String {
    NamingRule::default().resolve(port)
}
