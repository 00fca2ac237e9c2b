use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kernel::reactor::ReactorConfig;
use crate::nlu::NluConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration file. Every section is optional; missing keys
/// fall back to the built-in Croatian defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub nlu: NluConfig,
    pub reactor: ReactorConfig,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.reactor;
        for (name, value) in [
            ("confidence_threshold", r.confidence_threshold),
            ("min_asr_confidence", r.min_asr_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }
        if r.confirmation_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "confirmation_timeout_ms must be positive (use null to disable)".to_string(),
            ));
        }
        if r.execution_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "execution_timeout_ms must be positive".to_string(),
            ));
        }
        if self.nlu.intents.is_empty() {
            return Err(ConfigError::Invalid("intent table is empty".to_string()));
        }
        Ok(())
    }
}

impl ReactorConfig {
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_ms.map(Duration::from_millis)
    }

    pub fn execution_timeout(&self) -> Duration {
        Duration::from_millis(self.execution_timeout_ms)
    }
}
