// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI configuration file (`config.toml`)

use anyhow::{Context, Result};
use directories::ProjectDirs;
use goban_core::GameConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Let the built-in engine answer every Black move
    #[serde(default)]
    pub engine_white: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub game: GameConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            engine_white: false,
            log_level: default_log_level(),
            game: GameConfig::default(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "goban", "goban")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Read the config at `path`, falling back to defaults when it does not exist
pub fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = toml::from_str::<CliConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config
        .game
        .validate()
        .with_context(|| format!("Invalid game settings in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.game.board_size, 9);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "engine_white = true\n\n[game]\nboard_size = 13\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.engine_white);
        assert_eq!(config.game.board_size, 13);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_serialization() {
        let config = CliConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_invalid_size_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[game]\nboard_size = 40\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "game = [").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
