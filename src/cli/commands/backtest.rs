//! Backtest command implementation.

use anyhow::{Context, Result};
use regime_config::{load_config, SecretChain, TIINGO_API_KEY};
use regime_core::traits::PriceProvider;
use regime_data::{CsvSource, TiingoClient, TiingoConfig};
use regime_engine::RegimeConfig;
use std::path::Path;
use tracing::info;

use crate::cli::BacktestArgs;

use super::fetch_and_run;

pub async fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;

    let engine_config = RegimeConfig {
        window: args.window.unwrap_or(config.backtest.window),
        buffer: args.buffer.unwrap_or(config.backtest.buffer),
    };
    let start = args.start.unwrap_or(config.backtest.start_date);
    let end = args.end.unwrap_or_else(|| config.backtest.resolved_end());

    info!(symbol = %args.symbol, %start, %end, "starting backtest");

    let provider: Box<dyn PriceProvider> = if let Some(data_path) = &args.data {
        let path = data_path
            .to_str()
            .context("Data path is not valid UTF-8")?;
        Box::new(CsvSource::new(path)?)
    } else {
        let chain = SecretChain::standard(&config.provider.secrets_file)
            .context("Failed to load secrets")?;
        let api_key = chain
            .resolve(TIINGO_API_KEY)
            .context("No API token configured")?;
        let tiingo_config =
            TiingoConfig::new(api_key).with_base_url(config.provider.base_url.clone());
        Box::new(TiingoClient::new(tiingo_config)?)
    };

    let report = match fetch_and_run(
        provider.as_ref(),
        engine_config,
        &args.symbol,
        start,
        end,
    )
    .await
    {
        Ok(report) => report,
        Err(e) if e.is_no_data() => {
            println!(
                "Could not retrieve data or run backtest for {}.",
                args.symbol
            );
            return Ok(());
        }
        Err(e) => {
            println!("An error occurred during download: {}", e);
            return Ok(());
        }
    };

    // Output results
    match args.output.as_str() {
        "json" => {
            let json = report.to_json()?;
            println!("{}", json);
        }
        _ => {
            println!("{}", report.summary());
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
