//! seqguard.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_HORIZON_DAYS: u64 = 60;
pub const DEFAULT_DAILY_RATE: u64 = 100_000;
pub const DEFAULT_RATE_WINDOW_DAYS: u64 = 7;
/// Upper bound on `rate_window_days`, one hundred years.
pub const MAX_RATE_WINDOW_DAYS: u64 = 36_500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    pub signal: Option<SignalConfig>,
}

/// Knobs of the overflow projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Days ahead within which an overflow is reported.
    pub horizon_days: u64,
    /// Rate assumed for tables without creation timestamps.
    pub default_daily_rate: u64,
    /// Length of the history window used to estimate the rate.
    pub rate_window_days: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            default_daily_rate: DEFAULT_DAILY_RATE,
            rate_window_days: DEFAULT_RATE_WINDOW_DAYS,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_daily_rate == 0 {
            return Err(ConfigError::Invalid(
                "analysis.default_daily_rate must be at least 1".to_string(),
            ));
        }
        if self.rate_window_days == 0 {
            return Err(ConfigError::Invalid(
                "analysis.rate_window_days must be at least 1".to_string(),
            ));
        }
        if self.rate_window_days > MAX_RATE_WINDOW_DAYS {
            return Err(ConfigError::Invalid(format!(
                "analysis.rate_window_days must be at most {MAX_RATE_WINDOW_DAYS}"
            )));
        }
        Ok(())
    }
}

/// Where fail-soft alerts are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// JSON-lines file that receives one record per alert.
    pub file: PathBuf,
}

impl GuardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GuardConfig = toml::from_str(content)?;
        config.analysis.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a seqguard.toml with defaults and a file signal target.
    pub fn scaffold() -> Self {
        GuardConfig {
            analysis: AnalysisSettings::default(),
            signal: Some(SignalConfig {
                file: PathBuf::from("seqguard-alerts.jsonl"),
            }),
        }
    }
}
