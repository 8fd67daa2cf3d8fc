use std::process::Stdio;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use crate::error::RunnerError;

use super::types::BrewInvocation;

/// A spawned child with piped stdout/stderr. `brew` is non-interactive, so
/// stdin is closed at spawn time; some subcommands otherwise wait on it.
pub(super) struct ProcessSession {
    child: Child,
}

impl ProcessSession {
    pub(super) fn spawn(invocation: &BrewInvocation) -> Result<Self, RunnerError> {
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                RunnerError::Spawn(format!("{}: {e}", invocation.program.display()))
            })?;

        Ok(Self { child })
    }

    pub(super) fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub(super) fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    pub(super) async fn kill(&mut self) {
        let _ = self.child.kill().await;
    }

    pub(super) async fn wait(&mut self) -> Result<i32, RunnerError> {
        let status = self.child.wait().await.map_err(RunnerError::Wait)?;
        Ok(status.code().unwrap_or(-1))
    }
}
