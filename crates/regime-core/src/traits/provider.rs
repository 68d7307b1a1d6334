//! Price provider trait definition.

use crate::error::DataError;
use crate::types::PriceSeries;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for daily price-history providers.
///
/// A provider returns a time-ordered adjusted-close series for one symbol
/// over an inclusive date range. It may fail (network, auth, unknown symbol)
/// or report that the range holds no rows.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily adjusted closes for a symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker to fetch
    /// * `start` - First calendar date of the range
    /// * `end` - Last calendar date of the range
    ///
    /// # Returns
    /// A series ordered from oldest to newest, or `DataError::Empty` when the
    /// provider has no rows for the range.
    async fn daily_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
