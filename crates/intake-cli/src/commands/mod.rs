//! CLI command implementations

pub mod classify;
pub mod parse;
pub mod submit;

use crate::OutputFormat;
use intake_core::config::IntakeConfig;

/// Context passed to all commands
pub struct CommandContext {
    pub config: IntakeConfig,
    pub output_format: OutputFormat,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        matches!(self.output_format, OutputFormat::Json)
    }
}
