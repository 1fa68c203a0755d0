//! Process adapter running probes with `tokio::process`.

use async_trait::async_trait;
use binwrap_core::{CommandOutput, CommandRunner, DEFAULT_PROBE_TIMEOUT_SECS};
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// `CommandRunner` that spawns the program and bounds it with a timeout.
///
/// Children are killed when the timeout elapses.
#[derive(Debug, Clone)]
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }
}

impl TokioCommandRunner {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn command(program: &Path, args: &[String]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }

    fn timed_out(&self, program: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::TimedOut,
            format!(
                "{} did not exit within {}s",
                program.display(),
                self.timeout.as_secs()
            ),
        )
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn status(&self, program: &Path, args: &[String]) -> io::Result<Option<i32>> {
        debug!(program = %program.display(), ?args, "Running probe");
        let mut cmd = Self::command(program, args);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());

        let mut child = cmd.spawn()?;
        match timeout(self.timeout, child.wait()).await {
            Ok(status) => Ok(status?.code()),
            Err(_) => Err(self.timed_out(program)),
        }
    }

    async fn output(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        debug!(program = %program.display(), ?args, "Capturing output");
        let mut cmd = Self::command(program, args);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn()?;
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| self.timed_out(program))??;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
