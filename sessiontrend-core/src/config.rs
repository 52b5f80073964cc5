//! Strategy configuration.
//!
//! Periods and thresholds for both resolutions, loaded from TOML and
//! validated before a strategy is allowed to exist.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("strategy name must not be empty")]
    EmptyName,
    #[error("{field} must be >= 1, got {value}")]
    InvalidPeriod { field: &'static str, value: usize },
    #[error("strength_threshold must be within [0, 100], got {0}")]
    InvalidThreshold(f64),
    #[error("risk_multiplier must be finite and > 0, got {0}")]
    InvalidMultiplier(f64),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Parameters of the dual-timeframe trend strategy.
///
/// "slow" and "fast" prefixes name the resolution (daily vs intraday); the
/// `*_fast_period` / `*_slow_period` suffixes name the two EMAs within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    #[serde(default = "default_slow_fast_period")]
    pub slow_fast_period: usize,
    #[serde(default = "default_slow_slow_period")]
    pub slow_slow_period: usize,
    #[serde(default = "default_fast_fast_period")]
    pub fast_fast_period: usize,
    #[serde(default = "default_fast_slow_period")]
    pub fast_slow_period: usize,
    #[serde(default = "default_strength_period")]
    pub strength_period: usize,
    #[serde(default = "default_strength_threshold")]
    pub strength_threshold: f64,
    #[serde(default = "default_risk_period")]
    pub risk_period: usize,
    #[serde(default = "default_risk_multiplier")]
    pub risk_multiplier: f64,
}

fn default_slow_fast_period() -> usize {
    50
}
fn default_slow_slow_period() -> usize {
    200
}
fn default_fast_fast_period() -> usize {
    20
}
fn default_fast_slow_period() -> usize {
    50
}
fn default_strength_period() -> usize {
    14
}
fn default_strength_threshold() -> f64 {
    25.0
}
fn default_risk_period() -> usize {
    14
}
fn default_risk_multiplier() -> f64 {
    2.0
}

impl StrategyConfig {
    /// Default parameters under the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slow_fast_period: default_slow_fast_period(),
            slow_slow_period: default_slow_slow_period(),
            fast_fast_period: default_fast_fast_period(),
            fast_slow_period: default_fast_slow_period(),
            strength_period: default_strength_period(),
            strength_threshold: default_strength_threshold(),
            risk_period: default_risk_period(),
            risk_multiplier: default_risk_multiplier(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let periods = [
            ("slow_fast_period", self.slow_fast_period),
            ("slow_slow_period", self.slow_slow_period),
            ("fast_fast_period", self.fast_fast_period),
            ("fast_slow_period", self.fast_slow_period),
            ("strength_period", self.strength_period),
            ("risk_period", self.risk_period),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(ConfigError::InvalidPeriod { field, value });
            }
        }
        if !(0.0..=100.0).contains(&self.strength_threshold) {
            return Err(ConfigError::InvalidThreshold(self.strength_threshold));
        }
        if !self.risk_multiplier.is_finite() || self.risk_multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.risk_multiplier));
        }
        Ok(())
    }

    /// Bars the slow series needs before its crossover is read.
    pub fn slow_history(&self) -> usize {
        self.slow_fast_period.max(self.slow_slow_period)
    }

    /// Bars the fast series needs before its pass computes anything.
    pub fn fast_history(&self) -> usize {
        self.fast_fast_period
            .max(self.fast_slow_period)
            .max(self.strength_period)
    }

    /// BLAKE3 hash of the canonical JSON form.
    ///
    /// Field order is fixed by the struct definition, so equal configs hash equal.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
