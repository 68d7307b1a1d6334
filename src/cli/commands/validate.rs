//! Validate configuration command.

use anyhow::Result;
use regime_config::{load_config, SecretChain, TIINGO_API_KEY};
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Provider URL: {}", config.provider.base_url);
    println!("Regime window: {} days", config.backtest.window);
    println!("Band buffer: {:.1}%", config.backtest.buffer * 100.0);
    println!(
        "Date range: {} to {}",
        config.backtest.start_date,
        config.backtest.resolved_end()
    );
    println!();

    // Confirm the token resolves without ever printing it.
    let chain = SecretChain::standard(&config.provider.secrets_file)?;
    match chain.resolve(TIINGO_API_KEY) {
        Ok(_) => println!("API token: found"),
        Err(_) => {
            println!("API token: NOT FOUND");
            println!(
                "Add it to {:?} or set REGIME_TIINGO_API_KEY.",
                config.provider.secrets_file
            );
        }
    }

    Ok(())
}
