//! Application config file: strategy parameters, logging and session windows.
//!
//! ```toml
//! [strategy]
//! name = "TrendContinuation"
//! strength_threshold = 25.0
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [sessions]
//! asian_start = "21:00"
//! asian_end = "06:00"
//! ```
//!
//! Only `[strategy].name` is required; every other key has a default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sessiontrend_core::StrategyConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse config TOML")?;
        config.strategy.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, colored.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Session windows as `"HH:MM"` UTC strings. A window whose end is before
/// its start wraps midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub asian_start: String,
    pub asian_end: String,
    pub european_start: String,
    pub european_end: String,
    pub us_start: String,
    pub us_end: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            asian_start: "21:00".into(),
            asian_end: "06:00".into(),
            european_start: "06:00".into(),
            european_end: "16:00".into(),
            us_start: "13:00".into(),
            us_end: "22:00".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = AppConfig::from_toml("[strategy]\nname = \"TrendContinuation\"\n").unwrap();
        assert_eq!(config.strategy, StrategyConfig::named("TrendContinuation"));
        assert_eq!(config.logging, LoggingSettings::default());
        assert_eq!(config.sessions, SessionSettings::default());
    }

    #[test]
    fn full_config_parses() {
        let config = AppConfig::from_toml(
            r#"
            [strategy]
            name = "Fast"
            fast_fast_period = 10
            strength_threshold = 30.0

            [logging]
            level = "debug"
            format = "json"

            [sessions]
            us_start = "14:30"
            "#,
        )
        .unwrap();
        assert_eq!(config.strategy.fast_fast_period, 10);
        assert_eq!(config.strategy.strength_threshold, 30.0);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.sessions.us_start, "14:30");
        assert_eq!(config.sessions.us_end, "22:00");
    }

    #[test]
    fn missing_strategy_section_is_an_error() {
        assert!(AppConfig::from_toml("[logging]\nlevel = \"info\"\n").is_err());
    }

    #[test]
    fn invalid_strategy_is_refused() {
        let err = AppConfig::from_toml("[strategy]\nname = \"x\"\nstrength_threshold = 150.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("threshold"), "{err}");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/sessiontrend.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
