//! Process execution port definition.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Captured result of running a program to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code 0.
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Standard output, or standard error when stdout is blank.
    ///
    /// Plenty of tools print `--version` to stderr.
    pub fn text(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

/// Port for running an installed executable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, discarding its output, and return the exit code.
    ///
    /// `Ok(None)` means the process terminated without an exit code.
    async fn status(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>>;

    /// Run `program` with `args` and capture its output.
    async fn output(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput>;
}
