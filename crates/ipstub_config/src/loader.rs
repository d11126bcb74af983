//! Configuration file discovery, loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::path::{Path, PathBuf};

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "ipstub.toml";

/// Loads and validates a configuration.
///
/// `path` may name the file itself or a directory containing `ipstub.toml`.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    log::debug!("loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Finds the nearest `ipstub.toml` in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Loads the nearest configuration above `start`, or the defaults when there
/// is none.
pub fn discover_config(start: &Path) -> Result<GeneratorConfig, ConfigError> {
    match find_config(start) {
        Some(path) => load_config(&path),
        None => {
            log::debug!("no {CONFIG_FILE_NAME} found above {}, using defaults", start.display());
            Ok(GeneratorConfig::default())
        }
    }
}

/// Checks that required values are present and usable.
pub fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let required = [
        ("source.pattern", &config.source.pattern),
        ("output.file", &config.output.file),
        ("clock.name", &config.clock.name),
        ("naming.marker", &config.naming.marker),
        ("naming.input_prefix", &config.naming.input_prefix),
        ("naming.output_prefix", &config.naming.output_prefix),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
    }

    if config.clock.period_ns == Some(0) {
        return Err(ConfigError::ValidationError(
            "clock.period_ns must be positive".to_string(),
        ));
    }
    if config.clock.period_ns.is_none() {
        let frequency: ipstub_common::Frequency = config
            .clock
            .frequency
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("clock.frequency: {e}")))?;
        if frequency.whole_period_ns().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "clock.frequency {frequency} does not give a period of at least 1 ns"
            )));
        }
    }
    Ok(())
}

/// The text written by `ipstub init`: every setting at its default.
pub fn default_config_toml() -> Result<String, ConfigError> {
    let body = toml::to_string_pretty(&GeneratorConfig::default())
        .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
    Ok(format!("# ipstub configuration\n\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[source]
pattern = "NiFpgaIPWrapper_*.vhd"

[output]
file = "top_tb.sv"

[clock]
name = "clk80"
frequency = "80MHz"

[naming]
marker = "ctrlind"
input_prefix = "drv_"
output_prefix = "mon_"

[parse]
legacy = true

[testbench]
timescale = "1ns / 100ps"
includes = []
imports = ["uvm_pkg::*"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.source.pattern, "NiFpgaIPWrapper_*.vhd");
        assert_eq!(config.output.file, "top_tb.sv");
        assert_eq!(config.clock.name, "clk80");
        assert_eq!(config.clock_period_ns(), Some(13));
        assert_eq!(config.naming.input_prefix, "drv_");
        assert!(config.parse.legacy);
        assert!(config.testbench.includes.is_empty());
        assert_eq!(config.testbench.imports, vec!["uvm_pkg::*"]);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = load_config_from_str("[naming]\ninput_prefix = \"tb_\"\n").unwrap();
        assert_eq!(config.naming.marker, "ctrlind");
        assert_eq!(config.naming.input_prefix, "tb_");
        assert_eq!(config.naming.output_prefix, "out_ip_");
    }

    #[test]
    fn empty_marker_errors() {
        let err = load_config_from_str("[naming]\nmarker = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "naming.marker"));
    }

    #[test]
    fn empty_output_errors() {
        let err = load_config_from_str("[output]\nfile = \" \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "output.file"));
    }

    #[test]
    fn bad_frequency_errors() {
        let err = load_config_from_str("[clock]\nfrequency = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = load_config_from_str("[clock]\nfrequency = \"-5MHz\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn explicit_period_skips_frequency_check() {
        let config =
            load_config_from_str("[clock]\nfrequency = \"fast\"\nperiod_ns = 10\n").unwrap();
        assert_eq!(config.clock_period_ns(), Some(10));
        let err = load_config_from_str("[clock]\nperiod_ns = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_keys_error() {
        let err = load_config_from_str("[output]\nfiel = \"x.v\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn default_toml_roundtrips() {
        let text = default_config_toml().unwrap();
        assert!(text.contains("[naming]"));
        assert_eq!(load_config_from_str(&text).unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn load_from_dir_and_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[clock]\nname = \"clk\"\n").unwrap();
        assert_eq!(load_config(dir.path()).unwrap().clock.name, "clk");
        assert_eq!(
            load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().clock.name,
            "clk"
        );
    }

    #[test]
    fn discover_walks_upward() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[parse]\nlegacy = true\n").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(CONFIG_FILE_NAME)));
        assert!(discover_config(&nested).unwrap().parse.legacy);
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir/ipstub.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
