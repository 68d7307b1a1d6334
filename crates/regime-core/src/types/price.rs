//! Daily price series types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single daily observation: timestamp plus adjusted close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Dividend/split adjusted closing price
    pub adj_close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(timestamp: i64, adj_close: f64) -> Self {
        Self {
            timestamp,
            adj_close,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Get the calendar date of this observation.
    pub fn date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }
}

/// Time-ordered adjusted-close series for one ticker.
///
/// Immutable input to the engine: sources sort points by timestamp when
/// building the series and the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Ticker symbol
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series from unordered points; sorts by timestamp.
    pub fn new(symbol: String, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { symbol, points }
    }

    /// Get the number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get all points as a slice.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Get a point by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    /// Get the last point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Extract adjusted closes as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.adj_close).collect()
    }

    /// Extract timestamps as a vector.
    pub fn timestamps(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    /// Keep only points within [start, end] (inclusive calendar dates).
    pub fn clamp_to_range(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let points = self
            .points
            .iter()
            .filter(|p| {
                let d = p.date();
                d >= start && d <= end
            })
            .copied()
            .collect();
        Self {
            symbol: self.symbol.clone(),
            points,
        }
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn test_series_sorts_on_construction() {
        let series = PriceSeries::new(
            "AAPL".to_string(),
            vec![
                PricePoint::new(2 * DAY_MS, 102.0),
                PricePoint::new(0, 100.0),
                PricePoint::new(DAY_MS, 101.0),
            ],
        );

        assert_eq!(series.closes(), vec![100.0, 101.0, 102.0]);
        assert_eq!(series.get(0).unwrap().timestamp, 0);
        assert_eq!(series.last().unwrap().adj_close, 102.0);
    }

    #[test]
    fn test_point_date() {
        // 2024-01-15T00:00:00Z
        let point = PricePoint::new(1_705_276_800_000, 185.5);
        assert_eq!(
            point.date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_clamp_to_range() {
        let base = 1_705_276_800_000; // 2024-01-15
        let series = PriceSeries::new(
            "AAPL".to_string(),
            (0..10)
                .map(|i| PricePoint::new(base + i * DAY_MS, 100.0 + i as f64))
                .collect(),
        );

        let clamped = series.clamp_to_range(
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
        );

        assert_eq!(clamped.len(), 3);
        assert_eq!(clamped.closes(), vec![102.0, 103.0, 104.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("AAPL".to_string(), vec![]);
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }
}
