//! ipstub: Verilog testbench stubs for LabVIEW FPGA IP-export wrappers.
//!
//! Provides `ipstub generate` to write a testbench for the exported top-level
//! entity, `ipstub ports` to list the parsed port table, and `ipstub init` to
//! write a default `ipstub.toml`.

#![warn(missing_docs)]

mod generate;
mod init;
mod pipeline;
mod ports;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Testbench stub generator for IP-export VHDL wrappers.
#[derive(Parser, Debug)]
#[command(
    name = "ipstub",
    version,
    about = "Generate Verilog testbench stubs for LabVIEW FPGA exported IP"
)]
pub struct Cli {
    /// Print nothing but errors and diagnostics.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print extra progress and debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color diagnostics.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to an `ipstub.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a testbench stub from an exported wrapper.
    Generate(GenerateArgs),
    /// Print the parsed port table.
    Ports(PortsArgs),
    /// Write a default `ipstub.toml` into the current directory.
    Init {
        /// Overwrite an existing `ipstub.toml`.
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the `ipstub generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Top-level VHDL file produced by the IP export (default: search with
    /// the configured glob).
    #[arg(short, long)]
    pub source: Option<String>,

    /// Testbench file to write.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Clock period in nanoseconds.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub period: Option<u32>,

    /// Name of the testbench clock.
    #[arg(long)]
    pub clock: Option<String>,

    /// Skip malformed port declarations instead of failing.
    #[arg(long)]
    pub legacy: bool,

    /// Also print the generated testbench to stdout.
    #[arg(long)]
    pub print: bool,
}

/// Arguments for the `ipstub ports` subcommand.
#[derive(Parser, Debug)]
pub struct PortsArgs {
    /// Top-level VHDL file produced by the IP export.
    #[arg(short, long)]
    pub source: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Skip malformed port declarations instead of failing.
    #[arg(long)]
    pub legacy: bool,
}

/// `--color` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Color even when piped.
    Always,
    /// Plain text.
    Never,
}

/// Port table output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One aligned line per port.
    Text,
    /// A JSON array of port descriptors.
    Json,
}

/// Flags shared by every subcommand, after color detection.
pub struct GlobalArgs {
    /// `--quiet`.
    pub quiet: bool,
    /// `--verbose`.
    pub verbose: bool,
    /// Resolved `--color`.
    pub color: bool,
    /// `--config`, unresolved.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    colored::control::set_override(color);
    init_logging(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Ports(ref args) => ports::run(args, &global),
        Command::Init { force } => init::run(force, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The log filter used when `RUST_LOG` is unset.
fn default_log_level(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(default_log_level(quiet, verbose));
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_default() {
        let cli = Cli::parse_from(["ipstub", "generate"]);
        match cli.command {
            Command::Generate(ref args) => {
                assert!(args.source.is_none());
                assert!(args.output.is_none());
                assert!(args.period.is_none());
                assert!(args.clock.is_none());
                assert!(!args.legacy);
                assert!(!args.print);
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn parse_generate_with_args() {
        let cli = Cli::parse_from([
            "ipstub",
            "generate",
            "-s",
            "NiFpgaIPWrapper_top.vhd",
            "-o",
            "top_tb.v",
            "--period",
            "10",
            "--clock",
            "clk100",
            "--legacy",
            "--print",
        ]);
        match cli.command {
            Command::Generate(ref args) => {
                assert_eq!(args.source.as_deref(), Some("NiFpgaIPWrapper_top.vhd"));
                assert_eq!(args.output.as_deref(), Some("top_tb.v"));
                assert_eq!(args.period, Some(10));
                assert_eq!(args.clock.as_deref(), Some("clk100"));
                assert!(args.legacy);
                assert!(args.print);
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(Cli::try_parse_from(["ipstub", "generate", "--period", "0"]).is_err());
    }

    #[test]
    fn parse_ports_json() {
        let cli = Cli::parse_from(["ipstub", "ports", "--format", "json", "-s", "w.vhd"]);
        match cli.command {
            Command::Ports(ref args) => {
                assert_eq!(args.format, ReportFormat::Json);
                assert_eq!(args.source.as_deref(), Some("w.vhd"));
                assert!(!args.legacy);
            }
            _ => panic!("expected Ports command"),
        }
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["ipstub", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
        let cli = Cli::parse_from(["ipstub", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "ipstub",
            "--quiet",
            "--color",
            "never",
            "--config",
            "cfg/ipstub.toml",
            "ports",
        ]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config.as_deref(), Some("cfg/ipstub.toml"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ipstub", "generate", "-v", "--color", "always"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["ipstub", "-q", "-v", "ports"]).is_err());
    }

    #[test]
    fn missing_subcommand_errors() {
        assert!(Cli::try_parse_from(["ipstub"]).is_err());
    }

    #[test]
    fn log_levels() {
        assert_eq!(default_log_level(false, false), "warn");
        assert_eq!(default_log_level(true, false), "error");
        assert_eq!(default_log_level(false, true), "debug");
    }
}
