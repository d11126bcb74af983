//! Settings for one rendered testbench.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the stub needs besides the entity itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestbenchOptions {
    /// Name of the generated `module`.
    pub module_name: String,
    /// Name of the free-running clock `reg`.
    pub clock_name: String,
    /// Clock period in whole nanoseconds.
    pub period_ns: u32,
    /// Text placed on the `Create Date:` banner line.
    pub timestamp: String,
    /// Argument of the `` `timescale `` directive.
    pub timescale: String,
    /// Files pulled in with `` `include ``.
    pub includes: Vec<String>,
    /// Packages pulled in with `import`.
    pub imports: Vec<String>,
    /// Name written on the closing `AUTO_GENERATED_CODE_END` marker.
    pub generator: String,
}

impl Default for TestbenchOptions {
    fn default() -> Self {
        Self {
            module_name: "autogenerated_tb".to_string(),
            clock_name: "clk40".to_string(),
            period_ns: 25,
            timestamp: String::new(),
            timescale: "1ns / 1ps".to_string(),
            includes: vec!["pysv_pkg.sv".to_string()],
            imports: vec!["pysv::*".to_string()],
            generator: "ipstub".to_string(),
        }
    }
}

/// Module name for an output path: its file name up to the first `.`.
///
/// `out/autogenerated_tb.v` gives `autogenerated_tb`; `top.tb.sv` gives `top`.
pub fn module_name_for(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name.into_owned(),
    }
}

/// Returns `true` if `name` is a plain Verilog identifier.
pub fn is_verilog_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_strips_from_first_dot() {
        assert_eq!(module_name_for(Path::new("autogenerated_tb.v")), "autogenerated_tb");
        assert_eq!(module_name_for(Path::new("sim/top.tb.sv")), "top");
        assert_eq!(module_name_for(Path::new("bench")), "bench");
        assert_eq!(module_name_for(Path::new(".v")), "");
        assert_eq!(module_name_for(Path::new("")), "");
    }

    #[test]
    fn identifiers() {
        assert!(is_verilog_identifier("autogenerated_tb"));
        assert!(is_verilog_identifier("_tb$1"));
        assert!(!is_verilog_identifier(""));
        assert!(!is_verilog_identifier("1tb"));
        assert!(!is_verilog_identifier("my-tb"));
    }
}
