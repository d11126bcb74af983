//! Loaded wrapper text and byte spans into it.
//!
//! Every VHDL file read during a run goes into a [`SourceDb`], which hands out
//! a [`FileId`]. Parser findings point into those files with a [`Span`], and
//! [`SourceDb::locate`] turns a span into a `path:line:col` [`Location`] for
//! display.

#![warn(missing_docs)]

pub mod db;
pub mod file;
pub mod span;

pub use db::{Location, SourceDb};
pub use file::SourceFile;
pub use span::{FileId, Span};
