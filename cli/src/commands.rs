use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "malt", version, about = "Headless maintenance front-end for Homebrew")]
pub struct Args {
    /// Suppress the progress spinner (errors are still printed).
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upgrade every outdated formula and cask.
    Upgrade,
    /// Uninstall orphaned dependency packages.
    Autoremove,
    /// Purge the download cache.
    Cleanup,
    /// Run Homebrew's diagnostic self-test.
    Doctor,
    /// Search formulae and casks concurrently.
    Search {
        /// Term to look for.
        term: String,
    },
    /// List upgradeable packages.
    Outdated {
        /// Emit the decoded listing as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run the configurable maintenance sequence.
    Maintenance {
        /// Do not uninstall orphaned packages.
        #[arg(long)]
        skip_orphans: bool,
        /// Do not purge the download cache.
        #[arg(long)]
        skip_cache: bool,
        /// Also run the diagnostic self-test.
        #[arg(long)]
        health_check: bool,
    },
}
