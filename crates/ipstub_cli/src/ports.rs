//! `ipstub ports`: print the parsed port table.

use std::path::Path;

use ipstub_diagnostics::DiagnosticSink;
use ipstub_entity::{Entity, PortDescriptor};
use ipstub_source::SourceDb;

use crate::pipeline::{
    load_entity, parse_options, print_summary, render_diagnostics, resolve_config, resolve_source,
};
use crate::{GlobalArgs, PortsArgs, ReportFormat};

/// Runs the `ipstub ports` command in the current directory.
///
/// Returns exit code 0 on success, 1 if the wrapper has parse errors.
pub fn run(args: &PortsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    match table(&cwd, args, global)? {
        Some(text) => {
            println!("{text}");
            Ok(0)
        }
        None => Ok(1),
    }
}

/// Parses the wrapper and formats its ports, or returns `None` on parse
/// errors.
pub fn table(
    cwd: &Path,
    args: &PortsArgs,
    global: &GlobalArgs,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let config = resolve_config(global, cwd)?;
    let source = resolve_source(args.source.as_deref(), &config, global, cwd)?;
    let options = parse_options(&config, args.legacy);

    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let entity = load_entity(&source, &options, &mut source_db, &sink)?;
    render_diagnostics(&sink, &source_db, global.color);
    print_summary(&sink, global);

    let Some(entity) = entity else {
        return Ok(None);
    };
    let text = match args.format {
        ReportFormat::Text => format_text(&entity),
        ReportFormat::Json => {
            let ports: Vec<&PortDescriptor> = entity.iter().collect();
            serde_json::to_string_pretty(&ports)?
        }
    };
    Ok(Some(text))
}

fn format_text(entity: &Entity) -> String {
    let mut out = format!("entity {}", entity.name);
    for port in entity.iter() {
        out.push('\n');
        out.push_str(&port.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{global, WRAPPER};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("NiFpgaIPWrapper_demo.vhd"), WRAPPER).unwrap();
        tmp
    }

    #[test]
    fn text_table() {
        let tmp = setup();
        let args = PortsArgs {
            source: None,
            format: ReportFormat::Text,
            legacy: false,
        };
        let text = table(tmp.path(), &args, &global()).unwrap().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "entity NiFpgaIPWrapper_demo");
        assert_eq!(lines.len(), 9);
        assert!(lines[6].starts_with("ctrlind_00_Setpoint "));
        assert!(lines[6].contains("-> in_ip_setpoint "));
        assert!(lines[6].ends_with(", IN, std_logic_vector, 16"));
        assert!(lines[8].ends_with(", OUT, std_logic"));
    }

    #[test]
    fn json_table() {
        let tmp = setup();
        let args = PortsArgs {
            source: Some("NiFpgaIPWrapper_demo.vhd".to_string()),
            format: ReportFormat::Json,
            legacy: false,
        };
        let text = table(tmp.path(), &args, &global()).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let ports = json.as_array().unwrap();
        assert_eq!(ports.len(), 8);
        assert_eq!(ports[0]["declared_name"], "Clk40");
        assert_eq!(ports[0]["local_name"], "clk40");
        assert_eq!(ports[6]["direction"], "out");
        assert_eq!(ports[6]["width"], 16);
    }

    #[test]
    fn parse_errors_give_none() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("NiFpgaIPWrapper_bad.vhd"), "nothing to see\n").unwrap();
        let args = PortsArgs {
            source: None,
            format: ReportFormat::Text,
            legacy: false,
        };
        assert!(table(tmp.path(), &args, &global()).unwrap().is_none());
    }
}
