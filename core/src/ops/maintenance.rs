use chrono::{DateTime, Utc};

use crate::error::RunnerError;
use crate::events::OpReporter;
use crate::runner::OutputStream;
use crate::scrape::{classify_stderr, extract_orphan_count, StderrClass};

use super::BrewRunner;

/// Which maintenance steps to run. Defaults mirror what users actually tick:
/// orphan removal and cache purge on, health check opt-in.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceOptions {
    pub uninstall_orphans: bool,
    pub purge_cache: bool,
    pub health_check: bool,
}

impl Default for MaintenanceOptions {
    fn default() -> Self {
        Self {
            uninstall_orphans: true,
            purge_cache: true,
            health_check: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaintenanceReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// `None` when the step was skipped. Extraction failure defaults to 0.
    pub orphans_removed: Option<u64>,
    pub cache_purged: bool,
    /// `brew cleanup` skipped some downloads because packages were held back
    /// on older versions. Informational, not an error.
    pub cache_skipped_held_back: bool,
    /// `None` when the health check was skipped.
    pub health_check_ok: Option<bool>,
    /// Every fatal-classified stderr line from every step, in order.
    /// Presented once, after the whole sequence finishes.
    pub errors: Vec<String>,
}

impl MaintenanceReport {
    pub fn found_no_problems(&self) -> bool {
        self.errors.is_empty() && self.health_check_ok.unwrap_or(true)
    }
}

/// Runs the selected maintenance steps in order: orphan removal, cache
/// purge, health check. Best-effort by design — a step that reports errors
/// (or fails to launch) is recorded and the sequence proceeds to the next
/// step regardless.
pub async fn run_maintenance(
    runner: &dyn BrewRunner,
    opts: MaintenanceOptions,
    reporter: &mut OpReporter,
) -> MaintenanceReport {
    let started_at = Utc::now();

    let mut orphans_removed = None;
    let mut cache_purged = false;
    let mut cache_skipped_held_back = false;
    let mut health_check_ok = None;
    let mut errors: Vec<String> = Vec::new();

    if opts.uninstall_orphans {
        match autoremove_step(runner, reporter, &mut errors).await {
            Ok(count) => orphans_removed = Some(count),
            Err(e) => {
                tracing::error!(error = %e, "orphan removal failed to run");
                reporter.error(&e.to_string());
                errors.push(format!("orphan removal: {e}"));
                orphans_removed = Some(0);
            }
        }
    } else {
        tracing::debug!("skipping orphan removal");
    }

    if opts.purge_cache {
        match cleanup_step(runner, reporter, &mut errors).await {
            Ok(skipped) => {
                cache_purged = true;
                cache_skipped_held_back = skipped;
            }
            Err(e) => {
                tracing::error!(error = %e, "cache purge failed to run");
                reporter.error(&e.to_string());
                errors.push(format!("cache purge: {e}"));
            }
        }
    } else {
        tracing::debug!("skipping cache purge");
    }

    if opts.health_check {
        match doctor_step(runner, reporter, &mut errors).await {
            Ok(ok) => health_check_ok = Some(ok),
            Err(e) => {
                tracing::error!(error = %e, "health check failed to run");
                reporter.error(&e.to_string());
                errors.push(format!("health check: {e}"));
                health_check_ok = Some(false);
            }
        }
    } else {
        tracing::debug!("skipping health check");
    }

    MaintenanceReport {
        started_at,
        finished_at: Utc::now(),
        orphans_removed,
        cache_purged,
        cache_skipped_held_back,
        health_check_ok,
        errors,
    }
}

/// `brew autoremove`: uninstalls orphaned dependencies and scrapes the
/// removed count out of the announcement line.
async fn autoremove_step(
    runner: &dyn BrewRunner,
    reporter: &mut OpReporter,
    errors: &mut Vec<String>,
) -> Result<u64, RunnerError> {
    reporter.step_started("autoremove");

    let mut stream = runner.start(&["autoremove"]).await?;
    let mut count: Option<u64> = None;

    while let Some(line) = stream.next_line().await {
        match line.stream {
            OutputStream::Stdout => {
                reporter.tick();
                if count.is_none() {
                    if let Ok(n) = extract_orphan_count(&line.text) {
                        count = Some(n);
                    }
                }
            }
            OutputStream::Stderr => {
                collect_stderr(&line.text, reporter, errors);
            }
        }
    }
    let outcome = stream.wait().await?;
    reporter.step_finished("autoremove", outcome.exit_code == 0);

    let count = count.unwrap_or_else(|| {
        // No "Autoremoving N unneeded" line: either nothing was orphaned or
        // brew changed its wording. Recoverable; default to zero.
        tracing::warn!("orphan count pattern not found in autoremove output");
        0
    });
    Ok(count)
}

/// `brew cleanup`: purges the download cache. Returns whether any purge was
/// skipped because the installed version is held back.
async fn cleanup_step(
    runner: &dyn BrewRunner,
    reporter: &mut OpReporter,
    errors: &mut Vec<String>,
) -> Result<bool, RunnerError> {
    reporter.step_started("cleanup");

    let mut stream = runner.start(&["cleanup"]).await?;
    let mut skipped_held_back = false;

    while let Some(line) = stream.next_line().await {
        match line.stream {
            OutputStream::Stdout => reporter.tick(),
            OutputStream::Stderr => match classify_stderr(&line.text) {
                StderrClass::SkippedLatestVersion => {
                    tracing::debug!(line = %line.text, "cleanup skipped a held-back package");
                    skipped_held_back = true;
                    reporter.tick();
                }
                StderrClass::Ignorable => reporter.tick(),
                StderrClass::Fatal => {
                    reporter.error(&line.text);
                    errors.push(line.text);
                }
            },
        }
    }
    let outcome = stream.wait().await?;
    reporter.step_finished("cleanup", outcome.exit_code == 0);

    Ok(skipped_held_back)
}

/// `brew doctor`: healthy means exit code 0.
async fn doctor_step(
    runner: &dyn BrewRunner,
    reporter: &mut OpReporter,
    errors: &mut Vec<String>,
) -> Result<bool, RunnerError> {
    reporter.step_started("doctor");

    let mut stream = runner.start(&["doctor"]).await?;
    while let Some(line) = stream.next_line().await {
        match line.stream {
            OutputStream::Stdout => reporter.tick(),
            OutputStream::Stderr => collect_stderr(&line.text, reporter, errors),
        }
    }
    let outcome = stream.wait().await?;
    let ok = outcome.exit_code == 0;
    reporter.step_finished("doctor", ok);

    Ok(ok)
}

fn collect_stderr(text: &str, reporter: &mut OpReporter, errors: &mut Vec<String>) {
    match classify_stderr(text) {
        StderrClass::Ignorable | StderrClass::SkippedLatestVersion => reporter.tick(),
        StderrClass::Fatal => {
            reporter.error(text);
            errors.push(text.to_string());
        }
    }
}
