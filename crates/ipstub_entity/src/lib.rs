//! Port-list parsing for IP-export VHDL wrappers.
//!
//! [`parse_entity`] reads the first `entity ... end <name>;` block of a
//! wrapper into an [`Entity`] whose [`EntityPortTable`] keeps declaration
//! order. Each port's testbench-local name is filled in by a [`NamingRule`]:
//! `ctrlind_<NN>_<ident>` ports become `in_ip_<ident>` / `out_ip_<ident>`,
//! everything else is lower-cased.
//!
//! [`scan_entity`] returns every error and warning at once, and
//! [`parse_file`] reports them as diagnostics against a loaded source file.

#![warn(missing_docs)]

pub mod emit;
pub mod error;
pub mod naming;
pub mod parser;
pub mod port;

pub use emit::parse_file;
pub use error::{ParseError, ParseWarning, SourceLine};
pub use naming::{resolve_name, NamingRule};
pub use parser::{parse_entity, scan_entity, ParseOptions, ParseReport};
pub use port::{
    Direction, Entity, EntityPortTable, PortDescriptor, PortKind, PortShape, VectorOrder,
    VectorRange,
};

/// Parses the first entity in `text` with custom options, failing on the
/// first error.
pub fn parse_entity_with(text: &str, options: &ParseOptions) -> Result<Entity, ParseError> {
    scan_entity(text, options).into_result()
}
