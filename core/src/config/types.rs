use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub brew: BrewConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewConfig {
    /// Absolute path to the `brew` executable. Arguments are always passed
    /// verbatim, never through a shell.
    #[serde(default = "default_brew_path")]
    pub path: String,
}

fn default_brew_path() -> String {
    "/opt/homebrew/bin/brew".to_string()
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            path: default_brew_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Capacity of the channel carrying output lines to the consumer.
    #[serde(default = "default_line_channel_capacity")]
    pub line_channel_capacity: usize,

    /// How many trailing lines of each stream are kept for the final outcome.
    #[serde(default = "default_capture_lines")]
    pub capture_lines: usize,
}

fn default_line_channel_capacity() -> usize {
    1024
}

fn default_capture_lines() -> usize {
    256
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            line_channel_capacity: default_line_channel_capacity(),
            capture_lines: default_capture_lines(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "malt_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
