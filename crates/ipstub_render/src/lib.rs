//! Verilog testbench stubs for IP-export entities.
//!
//! [`render_testbench`] turns a parsed [`Entity`](ipstub_entity::Entity) into
//! a self-contained testbench module: a clock generator, one `reg` per input
//! and one `wire` per output (named by each port's local name), a `UUT`
//! instance bound by declared name, and a reset/enable sequence to start
//! writing tests from.

#![warn(missing_docs)]

pub mod error;
pub mod options;
pub mod writer;

pub use error::RenderError;
pub use options::{is_verilog_identifier, module_name_for, TestbenchOptions};
pub use writer::{declaration, render_testbench, TestbenchWriter};
