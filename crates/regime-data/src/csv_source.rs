//! CSV price source for offline backtests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use regime_core::error::DataError;
use regime_core::traits::PriceProvider;
use regime_core::types::{PricePoint, PriceSeries};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// CSV record format. Accepts the common header spellings exported by
/// brokers and data vendors.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(
        alias = "Adj Close",
        alias = "adjClose",
        alias = "adj_close",
        alias = "Close",
        alias = "close"
    )]
    adj_close: f64,
}

/// File-backed price source.
pub struct CsvSource {
    path: String,
}

impl CsvSource {
    /// Create a new CSV source.
    pub fn new(path: &str) -> Result<Self, DataError> {
        if !Path::new(path).exists() {
            return Err(DataError::Internal(format!("File not found: {}", path)));
        }
        Ok(Self {
            path: path.to_string(),
        })
    }

    fn read_points<R: Read>(reader: R) -> Result<Vec<PricePoint>, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut points = Vec::new();
        for result in csv_reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            points.push(PricePoint::new(
                Self::parse_timestamp(&record.date)?,
                record.adj_close,
            ));
        }

        Ok(points)
    }

    /// Parse various timestamp formats.
    fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
        let formats = [
            "%Y-%m-%d",
            "%Y-%m-%d %H:%M:%S",
            "%Y/%m/%d",
            "%m/%d/%Y",
            "%d-%m-%Y",
        ];

        for format in formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
                return Ok(dt.and_utc().timestamp_millis());
            }
            if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
                let dt = d.and_hms_opt(0, 0, 0).unwrap();
                return Ok(dt.and_utc().timestamp_millis());
            }
        }

        // Unix timestamp fallback; assume milliseconds if > 10 digits
        if let Ok(ts) = date_str.parse::<i64>() {
            if ts > 10_000_000_000 {
                return Ok(ts);
            } else {
                return Ok(ts * 1000);
            }
        }

        Err(DataError::Parse(format!(
            "Could not parse date: {}",
            date_str
        )))
    }
}

#[async_trait]
impl PriceProvider for CsvSource {
    async fn daily_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataError::Internal(e.to_string()))?;
        let points = Self::read_points(file)?;

        let series = PriceSeries::new(symbol.to_string(), points).clamp_to_range(start, end);
        if series.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(series)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
