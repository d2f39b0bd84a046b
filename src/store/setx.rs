use super::EnvStore;
use crate::error::{EvalDateError, EvalDateResult};
use std::process::Command;

const SETX: &str = "setx";

/// Windows user environment, written through `setx`
///
/// Reads come from the inherited process environment, which is where values
/// written by an earlier `setx` show up for newly started processes.
#[derive(Debug, Clone)]
pub struct SetxStore {
    program: String,
}

impl Default for SetxStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SetxStore {
    pub fn new() -> Self {
        Self::with_program(SETX)
    }

    /// Use a different executable with `setx`'s calling convention
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl EnvStore for SetxStore {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) -> EvalDateResult<()> {
        let output = Command::new(&self.program)
            .args([name, value])
            .output()
            .map_err(|e| {
                EvalDateError::persistence(
                    name,
                    1,
                    format!("Failed to run '{}': {}", self.program, e),
                )
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            stderr.into_owned()
        };

        // Killed by a signal: no code to forward
        let exit_code = output.status.code().unwrap_or(1);
        Err(EvalDateError::persistence(name, exit_code, message))
    }

    fn describe(&self) -> String {
        format!("user environment ({})", self.program)
    }
}
