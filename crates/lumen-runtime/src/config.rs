//! Runtime configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use lumen_core::{LumenError, LumenResult, LOCAL_ONLY, UNLIMITED_HOPS};

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Plain,
        }
    }
}

/// LUMEN runtime configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub logging: LoggingConfig,
    /// Hop budget given to mutators built by the recorder
    pub default_max_hops: i32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            logging: LoggingConfig::default(),
            default_max_hops: LOCAL_ONLY,
        }
    }
}

impl RuntimeConfig {
    pub fn from_json_str(json: &str) -> LumenResult<Self> {
        let config: RuntimeConfig =
            serde_json::from_str(json).map_err(|e| LumenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> LumenResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LumenError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> LumenResult<()> {
        if self.default_max_hops < UNLIMITED_HOPS {
            tracing::warn!(
                default_max_hops = self.default_max_hops,
                "rejected hop budget"
            );
            return Err(LumenError::Config(format!(
                "default_max_hops must be >= -1, got {}",
                self.default_max_hops
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(LumenError::Config("logging.level is empty".to_string()));
        }
        Ok(())
    }
}
