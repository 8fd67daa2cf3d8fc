use async_trait::async_trait;

use crate::error::RunnerError;

use super::types::{CommandOutcome, OutputLine};

/// The lazy line sequence every operation is written against. The real
/// implementation is [`super::CommandHandle`]; tests substitute scripted
/// streams.
#[async_trait]
pub trait CommandStream: Send {
    /// Next line from either stream, suspending until one is available.
    /// `None` means the child has closed both pipes; callers then call
    /// [`wait`](Self::wait) for the exit code. There is deliberately no
    /// exit-code event inside the sequence itself.
    async fn next_line(&mut self) -> Option<OutputLine>;

    async fn wait(&mut self) -> Result<CommandOutcome, RunnerError>;
}
