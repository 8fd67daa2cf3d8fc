//! `malt-core` drives the Homebrew command-line tool from Rust: it spawns
//! `brew`, streams its stdout/stderr line-by-line as they arrive, classifies
//! the noisy parts of its human-readable output, and runs multi-step
//! maintenance sequences on top of that primitive.
//!
//! The crate deliberately contains no package-manager logic of its own:
//! dependency resolution, installation and caching all stay inside the
//! wrapped binary.

pub mod config;
pub mod error;
pub mod events;
pub mod ops;
pub mod runner;
pub mod scrape;
pub mod util;

pub use error::{CliError, RunnerError, ScrapeError};
