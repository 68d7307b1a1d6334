//! Price-history providers.

mod csv_source;
mod tiingo;

pub use csv_source::CsvSource;
pub use tiingo::{TiingoClient, TiingoConfig};

use chrono::NaiveDate;
use regime_core::error::DataError;
use regime_core::traits::PriceProvider;
use regime_core::types::PriceSeries;

/// Load a date range from a CSV file.
pub async fn load_csv(
    path: &str,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, DataError> {
    let source = CsvSource::new(path)?;
    source.daily_prices(symbol, start, end).await
}
