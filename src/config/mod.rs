// Configuration management for tunestall
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backend: BackendConfig,
    pub player: PlayerConfig,
    pub ui: UiConfig,
}

/// Knobs for the mock backend that stands in for the real API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub mock_latency_ms: u64,
    pub download_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub default_volume: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub show_notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tunestall");

        Self {
            data_dir,
            backend: BackendConfig {
                mock_latency_ms: 500,
                download_latency_ms: 1000,
            },
            player: PlayerConfig {
                default_volume: 1.0,
            },
            ui: UiConfig {
                theme: "dark".to_string(),
                show_notifications: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("tunestall");

        Ok(config_dir.join("config.toml"))
    }

    /// Simulated round-trip time for mock backend calls.
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.backend.mock_latency_ms)
    }

    pub fn download_latency(&self) -> Duration {
        Duration::from_millis(self.backend.download_latency_ms)
    }
}
