use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default malt data directory: ~/.malt
pub fn get_malt_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".malt"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.malt/config.toml (highest)
    let malt_dir = get_malt_data_dir()?;
    let malt_config = malt_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if malt_config.exists() {
        let s = std::fs::read_to_string(&malt_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Update logging directory to use malt data directory if not set
    if cfg.logging.file
        && cfg
            .logging
            .directory
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    {
        let logs_dir = malt_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("MALT_BREW_PATH") {
        if !v.trim().is_empty() {
            cfg.brew.path = v;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_homebrew_prefix() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.brew.path, "/opt/homebrew/bin/brew");
        assert!(cfg.runner.line_channel_capacity > 0);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [brew]
            path = "/usr/local/bin/brew"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.brew.path, "/usr/local/bin/brew");
        assert_eq!(cfg.runner.capture_lines, 256);
        assert!(cfg.logging.enabled);
    }
}
