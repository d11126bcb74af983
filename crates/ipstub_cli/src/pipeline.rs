//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps `generate` and `ports` have in common: configuration
//! resolution, wrapper discovery, loading and parsing, and diagnostic output.

use std::path::{Path, PathBuf};

use ipstub_config::GeneratorConfig;
use ipstub_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use ipstub_entity::{Entity, ParseOptions};
use ipstub_source::SourceDb;

use crate::GlobalArgs;

/// Loads the configuration named by `--config`, or the nearest `ipstub.toml`
/// above `cwd`, or the defaults.
pub fn resolve_config(
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let config = match global.config {
        Some(ref path) => ipstub_config::load_config(&cwd.join(path))?,
        None => ipstub_config::discover_config(cwd)?,
    };
    Ok(config)
}

/// Finds the single file in `dir` matching `pattern`.
///
/// Zero or several matches are errors whose message says what to do next.
pub fn discover_source(dir: &Path, pattern: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let full = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join(pattern);
    let mut matches = glob::glob(&full.to_string_lossy())?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect::<Vec<_>>();
    matches.sort();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(format!(
            "no file matching `{pattern}` in {}\n  \
             run in the directory that holds the export output:\n    \
             - NiFpgaIPWrapper_???.vhd\n    \
             - NiFpgaAG_???.dcp\n  \
             (check the FPGA compilation directory, e.g. C:\\NIFPGA\\compilation)\n  \
             or pass the file with -s/--source",
            dir.display()
        )
        .into()),
        _ => {
            let listing = matches
                .iter()
                .map(|p| format!("\n    - {}", p.display()))
                .collect::<String>();
            Err(format!(
                "more than one file matches `{pattern}`; pass one with -s/--source:{listing}"
            )
            .into())
        }
    }
}

/// Resolves the wrapper to parse: `--source` if given, otherwise the
/// configured glob in `cwd`.
pub fn resolve_source(
    source: Option<&str>,
    config: &GeneratorConfig,
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = match source {
        Some(s) => cwd.join(s),
        None => {
            if !global.quiet {
                eprintln!(
                    "   Searching {} for `{}` (use -s/--source to choose a file)",
                    cwd.display(),
                    config.source.pattern
                );
            }
            let found = discover_source(cwd, &config.source.pattern)?;
            if !global.quiet {
                eprintln!("       Using {}", found.display());
            }
            found
        }
    };
    if !path.is_file() {
        return Err(format!("file '{}' not found", path.display()).into());
    }
    Ok(path)
}

/// Parser options from the config, with `--legacy` forcing legacy mode on.
pub fn parse_options(config: &GeneratorConfig, legacy: bool) -> ParseOptions {
    let mut options = config.parse_options();
    options.legacy |= legacy;
    options
}

/// Loads `path` into `source_db` and parses its entity, emitting diagnostics
/// into `sink`.
///
/// Returns `None` if parsing produced errors.
pub fn load_entity(
    path: &Path,
    options: &ParseOptions,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<Option<Entity>, Box<dyn std::error::Error>> {
    let file_id = source_db.load_file(path)?;
    log::debug!("loaded {} as file {}", path.display(), file_id.as_raw());
    Ok(ipstub_entity::parse_file(file_id, source_db, sink, options))
}

/// Renders all diagnostics from a sink to stderr using the terminal renderer.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(sink: &DiagnosticSink, source_db: &SourceDb, color: bool) -> usize {
    let diagnostics = sink.diagnostics();
    let renderer = TerminalRenderer::new(color);
    for diag in &diagnostics {
        eprintln!("{}", renderer.render(diag, source_db));
    }
    diagnostics.len()
}

/// Prints the error/warning totals unless quiet.
pub fn print_summary(sink: &DiagnosticSink, global: &GlobalArgs) {
    if !global.quiet && (sink.error_count() > 0 || sink.warning_count() > 0) {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            sink.error_count(),
            sink.warning_count()
        );
    }
}
