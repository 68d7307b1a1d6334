//! Command implementations.

pub mod backtest;
pub mod dashboard;
pub mod validate;

use chrono::NaiveDate;
use regime_core::traits::PriceProvider;
use regime_core::RegimeResult;
use regime_engine::{BacktestReport, RegimeConfig, RegimeEngine};

/// Fetch a price series and run the engine over it. One request, one pass.
pub(crate) async fn fetch_and_run(
    provider: &dyn PriceProvider,
    config: RegimeConfig,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> RegimeResult<BacktestReport> {
    let series = provider.daily_prices(symbol, start, end).await?;
    let result = RegimeEngine::new(config).run(&series)?;
    Ok(BacktestReport::new(result))
}
