use crate::error::CliError;
use crate::events::OpReporter;
use crate::runner::OutputStream;
use crate::scrape::{parse_outdated, OutdatedPackage};

use super::BrewRunner;

/// `brew outdated --json=v2`: the one machine-readable interface we use.
/// Stdout is buffered whole and decoded once the stream is exhausted.
pub async fn outdated(
    runner: &dyn BrewRunner,
    reporter: &mut OpReporter,
) -> Result<Vec<OutdatedPackage>, CliError> {
    reporter.step_started("outdated");

    let mut stream = runner.start(&["outdated", "--json=v2"]).await?;
    let mut json = String::new();

    while let Some(line) = stream.next_line().await {
        match line.stream {
            OutputStream::Stdout => {
                json.push_str(&line.text);
                json.push('\n');
                reporter.tick();
            }
            OutputStream::Stderr => {
                tracing::warn!(line = %line.text, "outdated stderr");
            }
        }
    }
    let outcome = stream.wait().await?;
    reporter.step_finished("outdated", outcome.exit_code == 0);

    let packages = parse_outdated(&json)?;
    tracing::debug!(count = packages.len(), "outdated packages decoded");
    Ok(packages)
}
