use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::command::Command;
use crate::errors::Result;

/// Executes commands and keeps the successful ones on a LIFO history stack
/// so the most recent can be undone.
///
/// The history is shared mutable state across concurrent requests. One lock
/// covers execute-then-push and pop-then-undo as units: a command lands in
/// history if and only if its execute completed, and two racing undos can
/// never pop the same entry.
pub struct CommandInvoker {
    history: Mutex<Vec<Box<dyn Command>>>,
}

impl CommandInvoker {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
        }
    }

    /// Run a command; push it onto history only when it succeeds. Failures
    /// propagate to the caller and the command is dropped unrecorded.
    pub async fn execute_command(&self, mut command: Box<dyn Command>) -> Result<serde_json::Value> {
        let mut history = self.history.lock().await;

        info!(command = command.name(), "Executing command");
        match command.execute().await {
            Ok(result) => {
                history.push(command);
                info!(history_depth = history.len(), "Command executed and recorded");
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, "Command failed; not recorded in history");
                Err(e)
            }
        }
    }

    /// Undo the most recently executed command. Returns `Ok(false)` when the
    /// history is empty. A failing undo propagates with the command already
    /// popped; the undo is not retried.
    pub async fn undo_last(&self) -> Result<bool> {
        let mut history = self.history.lock().await;

        let Some(mut command) = history.pop() else {
            warn!("No commands to undo");
            return Ok(false);
        };

        info!(command = command.name(), "Undoing command");
        command.undo().await?;
        info!(history_depth = history.len(), "Command undone");
        Ok(true)
    }

    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }
}

impl Default for CommandInvoker {
    fn default() -> Self {
        Self::new()
    }
}
