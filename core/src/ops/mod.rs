//! High-level brew operations built on the runner primitive: each one
//! invokes a fixed verb, feeds stdout/stderr through [`crate::scrape`], and
//! reports progress through [`crate::events`].

mod maintenance;
mod outdated;
mod search;
mod upgrade;

pub use maintenance::{run_maintenance, MaintenanceOptions, MaintenanceReport};
pub use outdated::outdated;
pub use search::{search, SearchResults};
pub use upgrade::{upgrade, UpgradeReport};

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{AppConfig, RunnerConfig};
use crate::error::RunnerError;
use crate::runner::{spawn_command, BrewInvocation, CommandStream};

/// Seam between operations and the real process runner, so tests can script
/// command output without spawning anything.
#[async_trait]
pub trait BrewRunner: Send + Sync {
    async fn start(&self, args: &[&str]) -> Result<Box<dyn CommandStream>, RunnerError>;
}

/// Spawns the configured `brew` binary for each invocation.
pub struct ProcessRunner {
    brew_path: PathBuf,
    runner: RunnerConfig,
}

impl ProcessRunner {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            brew_path: PathBuf::from(&cfg.brew.path),
            runner: cfg.runner.clone(),
        }
    }
}

#[async_trait]
impl BrewRunner for ProcessRunner {
    async fn start(&self, args: &[&str]) -> Result<Box<dyn CommandStream>, RunnerError> {
        let invocation = BrewInvocation::new(&self.brew_path, args.iter().copied());
        let (handle, _cancel) = spawn_command(invocation, &self.runner)?;
        Ok(Box::new(handle))
    }
}
