use std::path::PathBuf;

/// One external command to run: executable path plus verbatim arguments.
/// Immutable once created; constructed per call and discarded after exit.
#[derive(Debug, Clone)]
pub struct BrewInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl BrewInvocation {
    pub fn new(program: impl Into<PathBuf>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// One line written by the subprocess on either stream. Delivered exactly
/// once, in write order within its own stream; no ordering is guaranteed
/// between the two streams.
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

/// Terminal state of a finished (or killed) command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub exit_code: i32,
    pub duration_ms: u64,
    pub stdout_tail: Vec<String>,
    pub stderr_tail: Vec<String>,
    /// Reason string if the command was cancelled and the child killed.
    pub cancelled: Option<String>,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0 && self.cancelled.is_none()
    }
}
