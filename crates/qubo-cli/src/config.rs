use anyhow::{Context, Result};
use qubo_core::AnalyzerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is absent
pub const CONFIG_ENV: &str = "QUBO_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuboConfig {
    pub analyzer: AnalyzerOptions,
    pub output: OutputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json: bool,
    pub color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
        }
    }
}

impl QuboConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// `--config` first, then `$QUBO_CONFIG`, then built-in defaults
    pub fn resolve(cli_config: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = cli_config {
            Self::load_from_file(config_path)
        } else if let Ok(env_config) = std::env::var(CONFIG_ENV) {
            Self::load_from_file(env_config)
        } else {
            Ok(Self::default())
        }
    }
}
