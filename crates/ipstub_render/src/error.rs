//! Error types for testbench rendering.

/// Errors that can occur while writing a testbench stub.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The entity has no ports to drive or observe.
    #[error("entity `{0}` declares no ports")]
    EmptyEntity(String),

    /// The module name is empty or not a Verilog identifier.
    #[error("invalid testbench module name `{0}`")]
    InvalidModuleName(String),

    /// Writing to the output failed.
    #[error("failed to write testbench: {0}")]
    Io(#[from] std::io::Error),
}
