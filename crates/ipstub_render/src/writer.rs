//! Verilog testbench stub writer.
//!
//! The stub has five parts, written in order: header (preamble, banner and
//! clock), declarations (one `reg`/`wire` per port), the `UUT` instantiation,
//! a fixed reset/enable `initial` block, and the closing tail.

use std::io::Write;

use ipstub_entity::{Direction, Entity, PortDescriptor};

use crate::error::RenderError;
use crate::options::{is_verilog_identifier, TestbenchOptions};

const INDENT: &str = "    ";

/// Writes testbench stubs to any [`Write`] sink.
pub struct TestbenchWriter<W: Write> {
    writer: W,
}

impl<W: Write> TestbenchWriter<W> {
    /// Creates a writer targeting `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the complete stub for `entity`.
    pub fn write_testbench(
        &mut self,
        entity: &Entity,
        options: &TestbenchOptions,
    ) -> Result<(), RenderError> {
        if entity.is_empty() {
            return Err(RenderError::EmptyEntity(entity.name.clone()));
        }
        if !is_verilog_identifier(&options.module_name) {
            return Err(RenderError::InvalidModuleName(options.module_name.clone()));
        }
        log::debug!(
            "rendering `{}` for entity `{}` ({} ports)",
            options.module_name,
            entity.name,
            entity.len()
        );
        self.write_header(options)?;
        self.write_declarations(entity, options)?;
        self.write_instantiation(entity)?;
        self.write_body()?;
        self.write_tail(options)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Preamble, banner, module line and the clock generator.
    pub fn write_header(&mut self, options: &TestbenchOptions) -> Result<(), RenderError> {
        let w = &mut self.writer;
        writeln!(w, "`timescale {}", options.timescale)?;
        writeln!(w)?;
        for include in &options.includes {
            writeln!(w, "`include \"{include}\"")?;
        }
        for import in &options.imports {
            writeln!(w, "import {import};")?;
        }
        if !options.includes.is_empty() || !options.imports.is_empty() {
            writeln!(w)?;
        }

        let banner = "/".repeat(82);
        writeln!(w, "{banner}")?;
        writeln!(w, "//")?;
        writeln!(w, "// Create Date: {}", options.timestamp)?;
        writeln!(w, "// Module Name: {}", options.module_name)?;
        writeln!(w, "// Description:")?;
        writeln!(w, "//")?;
        writeln!(w, "//")?;
        writeln!(w, "{banner}")?;
        writeln!(w)?;
        writeln!(w, "module {}();", options.module_name)?;
        writeln!(w)?;

        let clk = &options.clock_name;
        writeln!(w, "{INDENT}// {} ns clock period", options.period_ns)?;
        writeln!(w, "{INDENT}localparam period = {};", options.period_ns)?;
        writeln!(w, "{INDENT}localparam duty_cycle = period / 2;")?;
        writeln!(w)?;
        writeln!(w, "{INDENT}reg {clk};")?;
        writeln!(w)?;
        writeln!(w, "{INDENT}always")?;
        writeln!(w, "{INDENT}begin")?;
        writeln!(w, "{INDENT}{INDENT}{clk} = 1'b1;")?;
        writeln!(w, "{INDENT}{INDENT}#duty_cycle;")?;
        writeln!(w)?;
        writeln!(w, "{INDENT}{INDENT}{clk} = 1'b0;")?;
        writeln!(w, "{INDENT}{INDENT}#duty_cycle;")?;
        writeln!(w, "{INDENT}end")?;
        writeln!(w)?;
        Ok(())
    }

    /// One `reg` (input) or `wire` (output) per port, in table order.
    ///
    /// A port whose local name is the clock is bound to the header's clock
    /// `reg` and is not declared again.
    pub fn write_declarations(
        &mut self,
        entity: &Entity,
        options: &TestbenchOptions,
    ) -> Result<(), RenderError> {
        writeln!(self.writer, "{INDENT}// Variables for {}", entity.name)?;
        for port in entity.iter().filter(|p| p.local_name != options.clock_name) {
            writeln!(self.writer, "{}", declaration(port))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// The `UUT` instance with every port bound by name.
    pub fn write_instantiation(&mut self, entity: &Entity) -> Result<(), RenderError> {
        writeln!(self.writer, "{INDENT}{} UUT (", entity.name)?;
        let last = entity.len().saturating_sub(1);
        for (idx, port) in entity.iter().enumerate() {
            let sep = if idx == last { "" } else { "," };
            writeln!(
                self.writer,
                "{INDENT}{INDENT}.{}({}){sep}",
                port.declared_name, port.local_name
            )?;
        }
        writeln!(self.writer, "{INDENT});")?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// Reset and enable sequencing, then the first test placeholder.
    pub fn write_body(&mut self) -> Result<(), RenderError> {
        let w = &mut self.writer;
        let i2 = INDENT.repeat(2);
        writeln!(w, "{INDENT}initial")?;
        writeln!(w, "{INDENT}begin")?;
        writeln!(w, "{i2}// Set default control signal values")?;
        writeln!(w, "{i2}reset = 0;")?;
        writeln!(w, "{i2}enable_in = 0;")?;
        writeln!(w, "{i2}enable_clr = 0;")?;
        writeln!(w)?;
        writeln!(w, "{i2}// Reset IP - Hold for 20 clock cycles")?;
        writeln!(w, "{i2}reset = 1;")?;
        writeln!(w, "{i2}#(period * 20);")?;
        writeln!(w, "{i2}$display(\"Reset IP\");")?;
        writeln!(w)?;
        writeln!(w, "{i2}// Enable IP - Wait for 40 clock cycles")?;
        writeln!(w, "{i2}enable_in = 1;")?;
        writeln!(w, "{i2}reset = 0;")?;
        writeln!(w, "{i2}#(period * 40);")?;
        writeln!(w)?;
        writeln!(w, "{i2}// Enable IP - Wait for 20 clock cycles")?;
        writeln!(w, "{i2}enable_in = 1;")?;
        writeln!(w, "{i2}#(period * 20);")?;
        writeln!(w)?;
        writeln!(w, "{i2}$display(\"{}\");", rule('='))?;
        writeln!(w, "{i2}$display(\"| Start of Tests \");")?;
        writeln!(w, "{i2}$display(\"{}\");", rule('-'))?;
        writeln!(w)?;
        writeln!(w, "{i2}// Test #1 - <description>")?;
        writeln!(w, "{i2}$display(\"  Test #1 - <description>\");")?;
        writeln!(w)?;
        Ok(())
    }

    /// End banner, `$finish`, `endmodule` and the generator marker.
    pub fn write_tail(&mut self, options: &TestbenchOptions) -> Result<(), RenderError> {
        let w = &mut self.writer;
        let i2 = INDENT.repeat(2);
        writeln!(w, "{i2}$display(\"{}\");", rule('-'))?;
        writeln!(w, "{i2}$display(\"| {:<76}|\");", "End of TEST BENCH")?;
        writeln!(w, "{i2}$display(\"{}\");", rule('='))?;
        writeln!(w, "{i2}$display(\"\");")?;
        writeln!(w)?;
        writeln!(w, "{i2}$finish;")?;
        writeln!(w, "{INDENT}end")?;
        writeln!(w, "endmodule")?;
        writeln!(w)?;
        writeln!(w, "// AUTO_GENERATED_CODE_END: {}", options.generator)?;
        Ok(())
    }
}

/// The declaration line for one port, e.g. `    reg    [ 7:0]    in_ip_mode;`.
pub fn declaration(port: &PortDescriptor) -> String {
    let keyword = match port.direction {
        Direction::In => "reg    ",
        Direction::Out => "wire   ",
    };
    let range = match port.width() {
        Some(width) => format!("[{:>2}:0] ", width.saturating_sub(1)),
        None => " ".repeat(7),
    };
    format!("{INDENT}{keyword}{range}   {};", port.local_name)
}

fn rule(fill: char) -> String {
    format!("+{}+", fill.to_string().repeat(77))
}

/// Renders the complete stub for `entity` into a string.
pub fn render_testbench(entity: &Entity, options: &TestbenchOptions) -> Result<String, RenderError> {
    let mut writer = TestbenchWriter::new(Vec::new());
    writer.write_testbench(entity, options)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
