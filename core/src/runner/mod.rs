//! Spawns an external binary and streams its stdout/stderr as discrete lines.
//!
//! The runner never interprets output; classification of what a line means
//! lives in [`crate::scrape`]. Callers consume a lazy sequence of
//! [`OutputLine`] events that ends only once the child has closed both pipes.

mod handle;
mod io_pump;
mod session;
mod traits;
pub mod types;

pub use handle::{spawn_command, CancelHandle, CommandHandle};
pub use traits::CommandStream;
pub use types::{BrewInvocation, CommandOutcome, OutputLine, OutputStream};
