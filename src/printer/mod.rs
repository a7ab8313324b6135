//! Print dispatch through the system spooler.

use std::path::Path;

use tokio::process::Command;

use crate::app::{NewsprintError, Result};

/// Submits finished documents to the print queue via `lpr`.
#[derive(Debug, Clone)]
pub struct LprDispatcher {
    command: String,
}

impl LprDispatcher {
    pub fn new() -> Self {
        Self {
            command: "lpr".into(),
        }
    }

    /// Use another spooler binary. Tests point this at `true`/`false`.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Submit `path` as a job on `printer`. Resolves once the spooler
    /// accepts or rejects the submission; physical completion is not
    /// awaited, and there is no retry.
    pub async fn dispatch(&self, path: &Path, printer: &str) -> Result<()> {
        let status = Command::new(&self.command)
            .arg("-P")
            .arg(printer)
            .arg(path)
            .status()
            .await
            .map_err(|e| NewsprintError::Print {
                printer: printer.to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(NewsprintError::Print {
                printer: printer.to_string(),
                reason: format!("{} exited with {}", self.command, status),
            })
        }
    }
}

impl Default for LprDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
