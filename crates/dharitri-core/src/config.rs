//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Thresholds used when deriving calendar events and alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Look-ahead window for vaccination alerts, inclusive on both ends
    pub vaccination_window_days: i64,
    /// Production (L/day) strictly below which a low-production alert is raised
    pub low_production_threshold: f64,
    /// Months between the last checkup and the projected next one
    pub checkup_interval_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vaccination_window_days: 7,
            low_production_threshold: 15.0,
            checkup_interval_months: 3,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.vaccination_window_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "vaccination_window_days must not be negative (got {})",
                self.vaccination_window_days
            )));
        }
        if !self.low_production_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "low_production_threshold must be a finite number".into(),
            ));
        }
        Ok(())
    }
}
