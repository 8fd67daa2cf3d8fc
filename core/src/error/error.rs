use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("scrape failed: {0}")]
    Scrape(#[from] ScrapeError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("wait failed: {0}")]
    Wait(std::io::Error),
}

/// Failures while scraping `brew`'s human-readable or JSON output.
///
/// `PatternNotFound` is recoverable by design: callers fall back to a
/// zero/none result instead of aborting the operation.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("pattern `{pattern}` not found in output")]
    PatternNotFound { pattern: &'static str },
    #[error("json decode failed: {0}")]
    Json(#[from] serde_json::Error),
}
