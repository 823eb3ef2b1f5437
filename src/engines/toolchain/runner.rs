use super::command::{CommandChain, CommandLine};
use crate::error::{PassfitError, Result};
use std::process::Command;

/// Status reported for a child killed by a signal
pub const SIGNALLED_STATUS: i32 = -1;

/// Executes external commands synchronously.
///
/// Implementations block until the child exits and return its status; zero is
/// success. There is no timeout: a child that never exits blocks the caller.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &CommandLine) -> Result<i32>;

    /// Run each step in order, returning the first non-zero status.
    fn run_chain(&self, chain: &CommandChain) -> Result<i32> {
        for step in &chain.steps {
            let status = self.run(step)?;
            if status != 0 {
                return Ok(status);
            }
        }
        Ok(0)
    }
}

/// Runs commands as real child processes, inheriting stdout and stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> Result<i32> {
        log::trace!("exec: {}", command);

        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| PassfitError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(status.code().unwrap_or(SIGNALLED_STATUS))
    }
}
