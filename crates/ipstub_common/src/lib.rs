//! Types shared by the ipstub crates.

#![warn(missing_docs)]

pub mod frequency;

pub use frequency::{Frequency, ParseFrequencyError};
