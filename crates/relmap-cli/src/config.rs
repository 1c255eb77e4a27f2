//! Configuration management for the relmap CLI.

use anyhow::{Context, Result};
use relmap::prelude::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "relmap.toml";

/// relmap project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Researcher file; relative paths are resolved against the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_max_connections() -> usize { 10 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
        }
    }
}

impl Config {
    /// Load config from relmap.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&content, base)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    fn parse(content: &str, base: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.data.source = config.data.source.map(|source| base.join(source));
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find relmap.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("", Path::new("/project")).unwrap();
        assert!(config.data.source.is_none());
        assert_eq!(config.scoring, ScoringWeights::default());
        assert_eq!(config.display.max_connections, 10);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let content = r#"
[data]
source = "data/researchers.csv"

[scoring]
field = 5
"#;
        let config = Config::parse(content, Path::new("/project")).unwrap();
        assert_eq!(
            config.data.source,
            Some(PathBuf::from("/project/data/researchers.csv"))
        );
        assert_eq!(config.scoring.field, 5);
        assert_eq!(config.scoring.theme, 2);
        assert_eq!(config.scoring.keywords, 1);
    }

    #[test]
    fn absolute_source_is_kept() {
        let content = "[data]\nsource = \"/srv/researchers.json\"\n";
        let config = Config::parse(content, Path::new("/project")).unwrap();
        assert_eq!(config.data.source, Some(PathBuf::from("/srv/researchers.json")));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.data.source = Some(PathBuf::from("researchers.csv"));
        config.display.max_connections = 3;
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data.source, Some(dir.path().join("researchers.csv")));
        assert_eq!(loaded.display.max_connections, 3);
        assert_eq!(loaded.scoring, ScoringWeights::default());
    }
}
