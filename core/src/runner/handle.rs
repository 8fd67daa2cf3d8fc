use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::util::TailBuffer;

use super::io_pump;
use super::session::ProcessSession;
use super::traits::CommandStream;
use super::types::{BrewInvocation, CommandOutcome, OutputLine, OutputStream};

/// Starts `invocation` and returns the line sequence plus an explicit
/// cancellation handle. Cancelling kills the child outright; the pumps then
/// drain the pipes to EOF so every already-written line is still delivered.
pub fn spawn_command(
    invocation: BrewInvocation,
    cfg: &RunnerConfig,
) -> Result<(CommandHandle, CancelHandle), RunnerError> {
    tracing::debug!(program = %invocation.program.display(), args = ?invocation.args, "spawning command");

    let mut session = ProcessSession::spawn(&invocation)?;

    let stdout = session
        .take_stdout()
        .ok_or_else(|| RunnerError::Spawn("no stdout pipe".into()))?;
    let stderr = session
        .take_stderr()
        .ok_or_else(|| RunnerError::Spawn("no stderr pipe".into()))?;

    let stdout_tail = TailBuffer::new(cfg.capture_lines);
    let stderr_tail = TailBuffer::new(cfg.capture_lines);

    let (line_tx, line_rx) = mpsc::channel::<OutputLine>(cfg.line_channel_capacity);
    let out_task = io_pump::pump_stream(
        stdout,
        OutputStream::Stdout,
        stdout_tail.clone(),
        line_tx.clone(),
    );
    let err_task = io_pump::pump_stream(stderr, OutputStream::Stderr, stderr_tail.clone(), line_tx);

    let (cancel_tx, cancel_rx) = mpsc::channel::<String>(1);

    Ok((
        CommandHandle {
            session,
            line_rx,
            cancel_rx,
            cancel_closed: false,
            cancelled: None,
            out_task,
            err_task,
            stdout_tail,
            stderr_tail,
            started_at: Instant::now(),
        },
        CancelHandle { tx: cancel_tx },
    ))
}

/// Explicit cancellation signal for a running command. Cloneable so it can
/// be handed to a signal handler while the consumer keeps reading.
#[derive(Clone)]
pub struct CancelHandle {
    tx: mpsc::Sender<String>,
}

impl CancelHandle {
    pub async fn cancel(&self, reason: impl Into<String>) {
        let _ = self.tx.send(reason.into()).await;
    }
}

pub struct CommandHandle {
    session: ProcessSession,
    line_rx: mpsc::Receiver<OutputLine>,
    cancel_rx: mpsc::Receiver<String>,
    cancel_closed: bool,
    cancelled: Option<String>,
    out_task: JoinHandle<Result<u64, RunnerError>>,
    err_task: JoinHandle<Result<u64, RunnerError>>,
    stdout_tail: Arc<TailBuffer>,
    stderr_tail: Arc<TailBuffer>,
    started_at: Instant,
}

impl CommandHandle {
    async fn on_cancel(&mut self, reason: Option<String>) {
        match reason {
            Some(reason) => {
                tracing::warn!(reason = %reason, "cancelling command, killing child");
                self.session.kill().await;
                self.cancelled = Some(reason);
            }
            None => self.cancel_closed = true,
        }
    }
}

#[async_trait]
impl CommandStream for CommandHandle {
    async fn next_line(&mut self) -> Option<OutputLine> {
        loop {
            // Once cancelled (or with no cancel handles left) only the line
            // channel matters; it closes when both pumps hit EOF.
            if self.cancelled.is_some() || self.cancel_closed {
                return self.line_rx.recv().await;
            }
            tokio::select! {
                line = self.line_rx.recv() => return line,
                reason = self.cancel_rx.recv() => self.on_cancel(reason).await,
            }
        }
    }

    async fn wait(&mut self) -> Result<CommandOutcome, RunnerError> {
        // Stop accepting new lines so the pumps can finish even if the
        // caller abandoned the sequence early.
        self.line_rx.close();

        let exit_code = loop {
            if self.cancelled.is_some() || self.cancel_closed {
                break self.session.wait().await?;
            }
            tokio::select! {
                res = self.session.wait() => break res?,
                reason = self.cancel_rx.recv() => self.on_cancel(reason).await,
            }
        };

        match (&mut self.out_task).await {
            Ok(res) => {
                res?;
            }
            Err(e) => tracing::error!(error = %e, "stdout pump task panicked"),
        }
        match (&mut self.err_task).await {
            Ok(res) => {
                res?;
            }
            Err(e) => tracing::error!(error = %e, "stderr pump task panicked"),
        }

        let duration_ms = self.started_at.elapsed().as_millis() as u64;
        tracing::debug!(exit_code, duration_ms, cancelled = self.cancelled.is_some(), "command finished");

        Ok(CommandOutcome {
            exit_code,
            duration_ms,
            stdout_tail: self.stdout_tail.to_lines(),
            stderr_tail: self.stderr_tail.to_lines(),
            cancelled: self.cancelled.take(),
        })
    }
}
