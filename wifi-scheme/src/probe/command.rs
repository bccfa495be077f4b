/*!
 * Status tool backed by an external command (iwconfig by default)
 */

use std::process::Command;
use tracing::debug;

use super::{StatusOutput, StatusTool};
use crate::error::{Result, SchemeError};

pub const DEFAULT_STATUS_COMMAND: &str = "/sbin/iwconfig";

/// Runs `<program> <args...> <interface>` and captures its output.
#[derive(Debug, Clone)]
pub struct CommandStatusTool {
    program: String,
    args: Vec<String>,
}

impl CommandStatusTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandStatusTool {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_COMMAND, Vec::new())
    }
}

impl StatusTool for CommandStatusTool {
    fn run(&self, interface: &str) -> Result<StatusOutput> {
        debug!(program = %self.program, interface, "Running status command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(interface)
            .output()
            .map_err(|source| SchemeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdout first, then stderr
        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        Ok(StatusOutput {
            output: combined,
            exit_code: output.status.code(),
        })
    }
}
