//! `ipstub generate`: wrapper in, testbench stub out.
//!
//! 1. Resolve configuration and the source wrapper
//! 2. Load and parse the entity, rendering any diagnostics
//! 3. List the detected ports
//! 4. Render the testbench and write it to the output file

use std::io::{self, Write};
use std::path::Path;

use ipstub_config::GeneratorConfig;
use ipstub_diagnostics::DiagnosticSink;
use ipstub_render::{module_name_for, render_testbench, TestbenchOptions};
use ipstub_source::SourceDb;

use crate::pipeline::{
    load_entity, parse_options, print_summary, render_diagnostics, resolve_config, resolve_source,
};
use crate::{GenerateArgs, GlobalArgs};

/// Runs the `ipstub generate` command in the current directory.
///
/// Returns exit code 0 on success, 1 if the wrapper has parse errors.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    run_in(&std::env::current_dir()?, args, global)
}

/// Runs `ipstub generate` with relative paths resolved against `cwd`.
pub fn run_in(
    cwd: &Path,
    args: &GenerateArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    run_to(cwd, args, global, &mut io::stdout().lock())
}

/// As [`run_in`], echoing the stub into `out` when `--print` is set.
pub fn run_to(
    cwd: &Path,
    args: &GenerateArgs,
    global: &GlobalArgs,
    out: &mut dyn Write,
) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global, cwd)?;
    let source = resolve_source(args.source.as_deref(), &config, global, cwd)?;
    let output_name = args.output.as_deref().unwrap_or(&config.output.file);
    let output = cwd.join(output_name);

    if !global.quiet {
        eprintln!("    Parsing {}", source.display());
        eprintln!("     Output {}", output.display());
    }

    let options = parse_options(&config, args.legacy);
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let entity = load_entity(&source, &options, &mut source_db, &sink)?;
    render_diagnostics(&sink, &source_db, global.color);
    print_summary(&sink, global);

    let Some(entity) = entity else {
        return Ok(1);
    };

    if !global.quiet {
        eprintln!("   Detected {} port(s) on `{}`:", entity.len(), entity.name);
        for name in entity.declared_names() {
            eprintln!("      - {name}");
        }
    }

    let tb_options = testbench_options(&config, args, Path::new(output_name))?;
    if global.verbose {
        eprintln!(
            "      Clock {} with a {} ns period",
            tb_options.clock_name, tb_options.period_ns
        );
    }
    let text = render_testbench(&entity, &tb_options)?;

    if args.print {
        out.write_all(text.as_bytes())?;
        out.flush()?;
    }
    std::fs::write(&output, &text)?;
    if !global.quiet {
        eprintln!("      Wrote {}", output.display());
    }
    Ok(0)
}

/// Builds the render settings: flags first, then config, stamped with the
/// current local time.
fn testbench_options(
    config: &GeneratorConfig,
    args: &GenerateArgs,
    output: &Path,
) -> Result<TestbenchOptions, Box<dyn std::error::Error>> {
    let period_ns = match args.period {
        Some(period) => period,
        None => config
            .clock_period_ns()
            .ok_or("the configured clock does not give a period of at least 1 ns")?,
    };
    Ok(TestbenchOptions {
        module_name: module_name_for(output),
        clock_name: args.clock.clone().unwrap_or_else(|| config.clock.name.clone()),
        period_ns,
        timestamp: chrono::Local::now().format("%m/%d/%Y %I:%M %p").to_string(),
        timescale: config.testbench.timescale.clone(),
        includes: config.testbench.includes.clone(),
        imports: config.testbench.imports.clone(),
        generator: "ipstub".to_string(),
    })
}
