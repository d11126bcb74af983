//! Conformance test helpers for the ipstub generator.
//!
//! Runs wrapper text through the whole pipeline (load → parse → render) and
//! returns structured results for assertion in integration tests.

#![warn(missing_docs)]

use std::path::Path;

use ipstub_config::GeneratorConfig;
use ipstub_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use ipstub_entity::Entity;
use ipstub_render::{module_name_for, render_testbench, TestbenchOptions};
use ipstub_source::SourceDb;

/// Timestamp stamped on every rendered testbench, so output is comparable.
pub const FIXED_TIMESTAMP: &str = "01/02/2026 03:04 PM";

/// Result of running the parse → render pipeline.
pub struct PipelineResult {
    /// The parsed entity, or `None` if parsing failed.
    pub entity: Option<Entity>,
    /// All diagnostics emitted while parsing.
    pub diagnostics: Vec<Diagnostic>,
    /// The rendered testbench, if parsing succeeded and rendering did too.
    pub testbench: Option<String>,
    /// The rendering error message, if rendering was attempted and failed.
    pub render_error: Option<String>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Returns `true` if any error diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Diagnostic codes in emission order, e.g. `["W101", "E101"]`.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// The parsed entity; panics with the diagnostics if there is none.
    pub fn entity(&self) -> &Entity {
        match &self.entity {
            Some(entity) => entity,
            None => panic!("no entity; diagnostics: {:#?}", self.diagnostics),
        }
    }

    /// The rendered testbench; panics with the failure if there is none.
    pub fn testbench(&self) -> &str {
        match &self.testbench {
            Some(text) => text,
            None => panic!(
                "no testbench; render error: {:?}, diagnostics: {:#?}",
                self.render_error, self.diagnostics
            ),
        }
    }
}

/// Creates a validated configuration from TOML text.
pub fn make_config(toml: &str) -> GeneratorConfig {
    ipstub_config::load_config_from_str(toml).unwrap()
}

/// Runs the pipeline on wrapper text with the default configuration.
pub fn full_pipeline(source: &str) -> PipelineResult {
    run_pipeline(source, &GeneratorConfig::default())
}

/// Runs the pipeline with legacy parsing switched on.
pub fn full_pipeline_legacy(source: &str) -> PipelineResult {
    let mut config = GeneratorConfig::default();
    config.parse.legacy = true;
    run_pipeline(source, &config)
}

/// Runs the pipeline on wrapper text with the given configuration.
pub fn run_pipeline(source: &str, config: &GeneratorConfig) -> PipelineResult {
    let mut source_db = SourceDb::new();
    let file_id = source_db.add_source("NiFpgaIPWrapper_conformance.vhd", source.to_string());
    let sink = DiagnosticSink::new();

    let entity = ipstub_entity::parse_file(file_id, &source_db, &sink, &config.parse_options());

    let (testbench, render_error) = match &entity {
        Some(entity) => match render_testbench(entity, &testbench_options(config)) {
            Ok(text) => (Some(text), None),
            Err(e) => (None, Some(e.to_string())),
        },
        None => (None, None),
    };

    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    PipelineResult {
        entity,
        diagnostics,
        testbench,
        render_error,
        error_count,
        warning_count,
    }
}

/// Render settings taken from `config`, with [`FIXED_TIMESTAMP`].
pub fn testbench_options(config: &GeneratorConfig) -> TestbenchOptions {
    TestbenchOptions {
        module_name: module_name_for(Path::new(&config.output.file)),
        clock_name: config.clock.name.clone(),
        period_ns: config.clock_period_ns().unwrap_or(25),
        timestamp: FIXED_TIMESTAMP.to_string(),
        timescale: config.testbench.timescale.clone(),
        includes: config.testbench.includes.clone(),
        imports: config.testbench.imports.clone(),
        generator: "ipstub".to_string(),
    }
}
