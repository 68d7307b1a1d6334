//! Interactive dashboard command.

use anyhow::{Context, Result};
use regime_config::{load_config, SecretChain, TIINGO_API_KEY};
use regime_data::{TiingoClient, TiingoConfig};
use regime_engine::RegimeConfig;
use regime_tui::Dashboard;
use std::path::Path;
use tokio::runtime::Handle;
use tracing::info;

use crate::cli::DashboardArgs;

use super::fetch_and_run;

const REFRESH_MS: u64 = 250;

pub async fn run(args: DashboardArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;

    let engine_config = RegimeConfig {
        window: args.window.unwrap_or(config.backtest.window),
        buffer: args.buffer.unwrap_or(config.backtest.buffer),
    };
    let start = args.start.unwrap_or(config.backtest.start_date);
    let end = args.end.unwrap_or_else(|| config.backtest.resolved_end());

    let chain = SecretChain::standard(&config.provider.secrets_file)
        .context("Failed to load secrets")?;
    let api_key = chain
        .resolve(TIINGO_API_KEY)
        .context("No API token configured")?;
    let tiingo_config =
        TiingoConfig::new(api_key).with_base_url(config.provider.base_url.clone());
    let client = TiingoClient::new(tiingo_config)?;

    info!(window = engine_config.window, %start, %end, "starting dashboard");

    // The TUI event loop is synchronous; each submitted run blocks in place
    // on the async fetch.
    let handle = Handle::current();
    let dashboard = Dashboard::new(REFRESH_MS);
    tokio::task::block_in_place(|| {
        dashboard.run(|symbol| {
            handle.block_on(fetch_and_run(&client, engine_config, symbol, start, end))
        })
    })?;

    Ok(())
}
