//! Configuration types deserialized from `ipstub.toml`.

use ipstub_common::Frequency;
use ipstub_entity::{NamingRule, ParseOptions};
use serde::{Deserialize, Serialize};

/// The top-level generator configuration parsed from `ipstub.toml`.
///
/// Every section is optional; a missing file or an empty file yields
/// [`GeneratorConfig::default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Where to look for the exported wrapper.
    #[serde(default)]
    pub source: SourceConfig,
    /// Where the testbench is written.
    #[serde(default)]
    pub output: OutputConfig,
    /// The testbench clock.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Local-name mapping for tagged ports.
    #[serde(default)]
    pub naming: NamingConfig,
    /// Parser behavior.
    #[serde(default)]
    pub parse: ParseConfig,
    /// Testbench preamble.
    #[serde(default)]
    pub testbench: TestbenchConfig,
}

impl GeneratorConfig {
    /// The naming rule described by the `[naming]` section.
    pub fn naming_rule(&self) -> NamingRule {
        NamingRule {
            marker: self.naming.marker.clone(),
            input_prefix: self.naming.input_prefix.clone(),
            output_prefix: self.naming.output_prefix.clone(),
        }
    }

    /// Parser options described by the `[naming]` and `[parse]` sections.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            naming: self.naming_rule(),
            legacy: self.parse.legacy,
        }
    }

    /// The clock period in whole nanoseconds.
    ///
    /// An explicit `period_ns` wins over `frequency`. Returns `None` if
    /// neither yields a positive period; [`validate_config`] rejects such
    /// configurations.
    ///
    /// [`validate_config`]: crate::loader::validate_config
    pub fn clock_period_ns(&self) -> Option<u32> {
        match self.clock.period_ns {
            Some(0) => None,
            Some(period) => Some(period),
            None => self
                .clock
                .frequency
                .parse::<Frequency>()
                .ok()
                .and_then(|f| f.whole_period_ns()),
        }
    }
}

/// `[source]`: locating the exported wrapper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Glob matched in the working directory when no source is given.
    #[serde(default = "default_source_pattern")]
    pub pattern: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pattern: default_source_pattern(),
        }
    }
}

/// `[output]`: the generated file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output path. Its name up to the first `.` becomes the module name.
    #[serde(default = "default_output_file")]
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
        }
    }
}

/// `[clock]`: the free-running testbench clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockConfig {
    /// Name of the clock `reg`.
    #[serde(default = "default_clock_name")]
    pub name: String,
    /// Clock frequency, e.g. `"40MHz"`.
    #[serde(default = "default_clock_frequency")]
    pub frequency: String,
    /// Explicit period in ns, overriding `frequency`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_ns: Option<u32>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            name: default_clock_name(),
            frequency: default_clock_frequency(),
            period_ns: None,
        }
    }
}

/// `[naming]`: marker token and direction prefixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Token that starts a tagged port name.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Prefix for tagged input ports.
    #[serde(default = "default_input_prefix")]
    pub input_prefix: String,
    /// Prefix for tagged output ports.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let rule = NamingRule::default();
        Self {
            marker: rule.marker,
            input_prefix: rule.input_prefix,
            output_prefix: rule.output_prefix,
        }
    }
}

/// `[parse]`: parser strictness.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParseConfig {
    /// Skip malformed declarations with a warning instead of failing.
    #[serde(default)]
    pub legacy: bool,
}

/// `[testbench]`: lines emitted before the module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestbenchConfig {
    /// Argument of the `` `timescale `` directive.
    #[serde(default = "default_timescale")]
    pub timescale: String,
    /// Files pulled in with `` `include ``.
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    /// Packages pulled in with `import`.
    #[serde(default = "default_imports")]
    pub imports: Vec<String>,
}

impl Default for TestbenchConfig {
    fn default() -> Self {
        Self {
            timescale: default_timescale(),
            includes: default_includes(),
            imports: default_imports(),
        }
    }
}

fn default_source_pattern() -> String {
    "NiFpga*.vhd".to_string()
}

fn default_output_file() -> String {
    "autogenerated_tb.v".to_string()
}

fn default_clock_name() -> String {
    "clk40".to_string()
}

fn default_clock_frequency() -> String {
    "40MHz".to_string()
}

fn default_marker() -> String {
    NamingRule::default().marker
}

fn default_input_prefix() -> String {
    NamingRule::default().input_prefix
}

fn default_output_prefix() -> String {
    NamingRule::default().output_prefix
}

fn default_timescale() -> String {
    "1ns / 1ps".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["pysv_pkg.sv".to_string()]
}

fn default_imports() -> Vec<String> {
    vec!["pysv::*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_export_conventions() {
        let config = GeneratorConfig::default();
        assert_eq!(config.source.pattern, "NiFpga*.vhd");
        assert_eq!(config.output.file, "autogenerated_tb.v");
        assert_eq!(config.clock.name, "clk40");
        assert_eq!(config.clock_period_ns(), Some(25));
        assert_eq!(config.naming_rule(), NamingRule::default());
        assert!(!config.parse_options().legacy);
        assert_eq!(config.testbench.includes, vec!["pysv_pkg.sv"]);
    }

    #[test]
    fn explicit_period_wins() {
        let mut config = GeneratorConfig::default();
        config.clock.frequency = "100MHz".to_string();
        assert_eq!(config.clock_period_ns(), Some(10));
        config.clock.period_ns = Some(7);
        assert_eq!(config.clock_period_ns(), Some(7));
        config.clock.period_ns = Some(0);
        assert_eq!(config.clock_period_ns(), None);
    }

    #[test]
    fn unusable_frequency_has_no_period() {
        let mut config = GeneratorConfig::default();
        config.clock.frequency = "fast".to_string();
        assert_eq!(config.clock_period_ns(), None);
        config.clock.frequency = "0MHz".to_string();
        assert_eq!(config.clock_period_ns(), None);
        config.clock.frequency = "10GHz".to_string();
        assert_eq!(config.clock_period_ns(), None);
    }
}
