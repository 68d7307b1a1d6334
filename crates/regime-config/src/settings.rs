//! Configuration structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub backtest: BacktestDefaults,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "regime".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Market-data provider settings. The API token itself is resolved through
/// the secret chain, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub secrets_file: PathBuf,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.tiingo.com".to_string(),
            secrets_file: PathBuf::from("config/secrets.toml"),
        }
    }
}

/// Default backtest parameters, overridable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestDefaults {
    pub window: usize,
    pub buffer: f64,
    pub start_date: NaiveDate,
    /// Defaults to today when absent.
    pub end_date: Option<NaiveDate>,
}

impl BacktestDefaults {
    /// End date to use for a run.
    pub fn resolved_end(&self) -> NaiveDate {
        self.end_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

impl Default for BacktestDefaults {
    fn default() -> Self {
        Self {
            window: 200,
            buffer: 0.02,
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.app.name, "regime");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.backtest.window, 200);
        assert!((config.backtest.buffer - 0.02).abs() < 1e-12);
        assert_eq!(
            config.backtest.start_date,
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
        );
        assert!(config.backtest.end_date.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [backtest]
            window = 100
            buffer = 0.05
            start_date = "2020-06-01"
            end_date = "2024-12-31"
            "#,
        )
        .unwrap();

        assert_eq!(config.backtest.window, 100);
        assert_eq!(
            config.backtest.resolved_end(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        // Untouched sections fall back to defaults.
        assert_eq!(config.app.name, "regime");
        assert_eq!(config.provider.base_url, "https://api.tiingo.com");
    }

    #[test]
    fn test_resolved_end_defaults_to_today() {
        let defaults = BacktestDefaults::default();
        assert_eq!(defaults.resolved_end(), chrono::Utc::now().date_naive());
    }
}
