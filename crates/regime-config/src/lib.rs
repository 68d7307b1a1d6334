//! Configuration management.

mod secrets;
mod settings;

pub use secrets::{
    EnvSecrets, FileSecrets, SecretChain, SecretError, SecretSource, TIINGO_API_KEY,
};
pub use settings::{AppConfig, AppSettings, BacktestDefaults, LoggingConfig, ProviderSettings};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("REGIME")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
