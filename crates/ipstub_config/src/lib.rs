//! Parsing and validation of `ipstub.toml` generator configuration files.
//!
//! The file is optional. [`discover_config`] walks up from a directory to the
//! nearest `ipstub.toml` and falls back to [`GeneratorConfig::default`], which
//! reproduces the export tool's conventions: `NiFpga*.vhd` sources, a 40 MHz
//! `clk40` clock and `ctrlind` / `in_ip_` / `out_ip_` naming.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    default_config_toml, discover_config, find_config, load_config, load_config_from_str,
    validate_config, CONFIG_FILE_NAME,
};
pub use types::*;
