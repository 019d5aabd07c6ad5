//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::errors::ConfigError;
use crate::application::transport::TransportTiming;

/// Client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub app: AppConfig,
    pub transport: TransportConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    pub name: String,
    pub default_email: String,
}

/// Timing bounds for the simulated transport
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportConfig {
    pub connect_delay_ms: u64,
    pub typing_delay_min_ms: u64,
    pub typing_delay_max_ms: u64,
    pub presence_interval_min_ms: u64,
    pub presence_interval_max_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    pub directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                name: "messagesphere".to_string(),
                default_email: "john@example.com".to_string(),
            },
            transport: TransportConfig {
                connect_delay_ms: 1000,
                typing_delay_min_ms: 2000,
                typing_delay_max_ms: 4000,
                presence_interval_min_ms: 30_000,
                presence_interval_max_ms: 60_000,
            },
            storage: StorageConfig {
                directory: PathBuf::from("./data"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(email) = std::env::var("MESSAGESPHERE_EMAIL") {
            config.app.default_email = email;
        }

        if let Ok(dir) = std::env::var("MESSAGESPHERE_DATA_DIR") {
            config.storage.directory = PathBuf::from(dir);
        }

        config
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Write(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)
            .map_err(|e| ConfigError::Write(format!("Failed to write config: {}", e)))
    }
}

impl TransportConfig {
    /// Convert the flat config fields into the transport's timing bounds
    pub fn timing(&self) -> TransportTiming {
        TransportTiming {
            connect_delay_ms: self.connect_delay_ms,
            typing_delay_ms: self.typing_delay_min_ms..=self.typing_delay_max_ms,
            presence_interval_ms: self.presence_interval_min_ms..=self.presence_interval_max_ms,
        }
    }
}
