use crate::error::RunnerError;
use crate::events::OpReporter;
use crate::runner::OutputStream;
use crate::scrape::{classify_stderr, StderrClass};

use super::BrewRunner;

#[derive(Debug, Clone)]
pub struct UpgradeReport {
    pub exit_code: i32,
    /// Fatal-classified stderr lines, in arrival order. Shown as a list
    /// after the run; a bad line never aborts the upgrade.
    pub errors: Vec<String>,
    pub ticks: u64,
}

impl UpgradeReport {
    pub fn success(&self) -> bool {
        self.exit_code == 0 && self.errors.is_empty()
    }
}

/// Runs `brew upgrade`, ticking progress per stdout line and classifying
/// stderr. Tap checksum noise counts as progress; everything else on stderr
/// is accumulated.
pub async fn upgrade(
    runner: &dyn BrewRunner,
    reporter: &mut OpReporter,
) -> Result<UpgradeReport, RunnerError> {
    reporter.step_started("upgrade");

    let mut stream = runner.start(&["upgrade"]).await?;
    let mut errors = Vec::new();

    while let Some(line) = stream.next_line().await {
        match line.stream {
            OutputStream::Stdout => {
                tracing::debug!(line = %line.text, "upgrade output");
                reporter.tick();
            }
            OutputStream::Stderr => match classify_stderr(&line.text) {
                StderrClass::Ignorable | StderrClass::SkippedLatestVersion => {
                    tracing::debug!(line = %line.text, "ignorable upgrade stderr");
                    reporter.tick();
                }
                StderrClass::Fatal => {
                    tracing::warn!(line = %line.text, "upgrade error");
                    reporter.error(&line.text);
                    errors.push(line.text);
                }
            },
        }
    }

    let outcome = stream.wait().await?;
    let ok = outcome.exit_code == 0 && errors.is_empty();
    reporter.step_finished("upgrade", ok);

    Ok(UpgradeReport {
        exit_code: outcome.exit_code,
        errors,
        ticks: reporter.ticks(),
    })
}
