//! Findings about a wrapper file and how they are shown.
//!
//! The parser reports each problem as a [`Diagnostic`] into a shared
//! [`DiagnosticSink`]. Commands drain the sink and print every entry through
//! a [`DiagnosticRenderer`], normally the [`TerminalRenderer`].

#![warn(missing_docs)]

pub mod diagnostic;
pub mod kind;
pub mod renderer;
pub mod sink;

pub use diagnostic::{Diagnostic, Label, LabelStyle};
pub use kind::{Category, DiagnosticCode, Severity};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use sink::DiagnosticSink;
