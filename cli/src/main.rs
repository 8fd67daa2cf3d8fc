use clap::Parser;

mod commands;
mod progress;
mod render;

use commands::{Args, Commands};
use malt_core::config::LoggingConfig;
use malt_core::error::{CliError, RunnerError};
use malt_core::events::{self, OpReporter};
use malt_core::ops::{self, MaintenanceOptions, ProcessRunner};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = Args::parse();
    let cfg = malt_core::config::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::debug!(run_id = %run_id, brew = %cfg.brew.path, "run initialized");

    let runner = ProcessRunner::new(&cfg);

    let (tx, rx) = events::channel();
    let view = progress::spawn_view(rx, !args.quiet);
    let mut reporter = OpReporter::new(tx);

    let result = dispatch(args.command, &runner, &mut reporter).await;

    // Dropping the reporter closes the event channel and lets the spinner
    // task finish before the report is printed.
    drop(reporter);
    let _ = view.await;

    result
}

async fn dispatch(
    cmd: Commands,
    runner: &ProcessRunner,
    reporter: &mut OpReporter,
) -> Result<i32, CliError> {
    match cmd {
        Commands::Upgrade => {
            let report = ops::upgrade(runner, reporter).await?;
            render::upgrade(&report);
            Ok(if report.success() { 0 } else { 1 })
        }
        Commands::Autoremove => {
            let opts = MaintenanceOptions {
                uninstall_orphans: true,
                purge_cache: false,
                health_check: false,
            };
            let report = ops::run_maintenance(runner, opts, reporter).await;
            render::maintenance(&report);
            Ok(if report.errors.is_empty() { 0 } else { 1 })
        }
        Commands::Cleanup => {
            let opts = MaintenanceOptions {
                uninstall_orphans: false,
                purge_cache: true,
                health_check: false,
            };
            let report = ops::run_maintenance(runner, opts, reporter).await;
            render::maintenance(&report);
            Ok(if report.errors.is_empty() { 0 } else { 1 })
        }
        Commands::Doctor => {
            let opts = MaintenanceOptions {
                uninstall_orphans: false,
                purge_cache: false,
                health_check: true,
            };
            let report = ops::run_maintenance(runner, opts, reporter).await;
            render::maintenance(&report);
            Ok(if report.found_no_problems() { 0 } else { 1 })
        }
        Commands::Search { term } => {
            let results = ops::search(runner, &term, reporter).await?;
            render::search(&term, &results);
            Ok(0)
        }
        Commands::Outdated { json } => {
            let packages = ops::outdated(runner, reporter).await?;
            render::outdated(&packages, json)?;
            Ok(0)
        }
        Commands::Maintenance {
            skip_orphans,
            skip_cache,
            health_check,
        } => {
            let opts = MaintenanceOptions {
                uninstall_orphans: !skip_orphans,
                purge_cache: !skip_cache,
                health_check,
            };
            let report = ops::run_maintenance(runner, opts, reporter).await;
            render::maintenance(&report);
            Ok(if report.errors.is_empty() { 0 } else { 1 })
        }
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 1: operation reported errors
    // 11: config error
    // 20: runner start / IO error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Runner(re) => match re {
            RunnerError::Spawn(_) => 20,
            RunnerError::StreamIo { .. } => 20,
            RunnerError::Wait(_) => 20,
        },
        CliError::Io(_) => 20,
        CliError::Scrape(_) => 50,
        CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(cfg: &LoggingConfig) -> Result<(), String> {
    if !cfg.enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.level.clone()));

    let console_layer = cfg.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let file_layer = if cfg.file {
        let dir = cfg
            .directory
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().to_string_lossy().to_string());
        let appender = tracing_appender::rolling::daily(dir, "malt.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing: {e}"))
}
