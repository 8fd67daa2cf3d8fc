use crate::error::RunnerError;
use crate::events::OpReporter;
use crate::runner::{CommandStream, OutputStream};
use crate::scrape::{parse_search_results, PackageKind};

use super::BrewRunner;

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub formulae: Vec<String>,
    pub casks: Vec<String>,
}

/// Searches formulae and casks concurrently. Each invocation owns its own
/// result buffer; the two are merged only after both commands finish, so
/// concurrent writes can never interleave.
pub async fn search(
    runner: &dyn BrewRunner,
    term: &str,
    reporter: &mut OpReporter,
) -> Result<SearchResults, RunnerError> {
    reporter.step_started("search");

    let formulae_fut = search_kind(runner, term, PackageKind::Formula);
    let casks_fut = search_kind(runner, term, PackageKind::Cask);
    let (formulae, casks) = tokio::try_join!(formulae_fut, casks_fut)?;

    reporter.step_finished("search", true);
    Ok(SearchResults { formulae, casks })
}

async fn search_kind(
    runner: &dyn BrewRunner,
    term: &str,
    kind: PackageKind,
) -> Result<Vec<String>, RunnerError> {
    let kind_flag = match kind {
        PackageKind::Formula => "--formula",
        PackageKind::Cask => "--cask",
    };
    let mut stream = runner.start(&["search", kind_flag, term]).await?;

    let mut lines = Vec::new();
    while let Some(line) = stream.next_line().await {
        if line.stream == OutputStream::Stdout {
            lines.push(line.text);
        } else {
            // "No formulae or casks found" style messages land on stderr;
            // an empty result is not an error here.
            tracing::debug!(line = %line.text, "search stderr");
        }
    }
    drain_exit(&mut stream).await?;

    Ok(parse_search_results(&lines))
}

async fn drain_exit(stream: &mut Box<dyn CommandStream>) -> Result<(), RunnerError> {
    // brew search exits non-zero when nothing matches; treat that as empty.
    let outcome = stream.wait().await?;
    if outcome.exit_code != 0 {
        tracing::debug!(exit_code = outcome.exit_code, "search exited non-zero");
    }
    Ok(())
}
