//! Fail-fast script execution
//!
//! Commands run strictly in script order. The first failing command
//! stops the run; nothing after it executes and nothing is retried.

use crate::command::Command;
use crate::context::ProcessingContext;
use crate::error::ScriptError;
use crate::ops::execute_command;

/// The command a run stopped at, and why
#[derive(Debug)]
pub struct CommandFailure {
    /// Zero-based position of the failing command in the script
    pub index: usize,
    pub command: Command,
    pub error: ScriptError,
}

/// Result of one script run
#[derive(Debug)]
pub struct ScriptOutcome {
    /// Commands that completed before the run stopped
    pub executed: usize,
    /// Commands left unexecuted after the failing one
    pub remaining: usize,
    pub failure: Option<CommandFailure>,
}

impl ScriptOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run a parsed script against the context, stopping at the first error
pub async fn execute_script(
    commands: Vec<Command>,
    ctx: &mut ProcessingContext,
) -> ScriptOutcome {
    let total = commands.len();
    for (index, command) in commands.into_iter().enumerate() {
        log::debug!("Executing {}", command);
        if let Err(error) = execute_command(&command, ctx).await {
            log::error!("Command {} failed: {}", command, error);
            return ScriptOutcome {
                executed: index,
                remaining: total - index - 1,
                failure: Some(CommandFailure {
                    index,
                    command,
                    error,
                }),
            };
        }
    }
    ScriptOutcome {
        executed: total,
        remaining: 0,
        failure: None,
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
