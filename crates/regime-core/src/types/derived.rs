//! Derived backtest output types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Position state decided by the regime signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Fully out of the market
    #[default]
    Flat,
    /// Fully invested
    Long,
}

impl Position {
    /// Portfolio weight applied to the daily return.
    #[inline]
    pub fn weight(&self) -> f64 {
        match self {
            Position::Flat => 0.0,
            Position::Long => 1.0,
        }
    }

    /// Whether the position is invested.
    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long)
    }
}

/// Per-day computed fields, aligned with the retained tail of the input
/// series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Adjusted close for the day
    pub price: f64,
    /// Rolling regime mean over the configured window
    pub regime_mean: f64,
    /// Breakout threshold above the mean
    pub upper_band: f64,
    /// Breakdown threshold below the mean
    pub lower_band: f64,
    /// Signal decided from the day's close
    pub signal: Position,
    /// Position actually held for the day (previous day's signal)
    pub applied_signal: Position,
    /// Close-to-close simple return
    pub daily_return: f64,
    /// Daily return earned by the strategy
    pub strategy_return: f64,
    /// Compounded buy-and-hold growth since the first retained row
    pub buy_hold_cumulative: f64,
    /// Compounded strategy growth since the first retained row
    pub strategy_cumulative: f64,
}

impl DerivedRow {
    /// Get the calendar date of this row.
    pub fn date(&self) -> NaiveDate {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
            .date_naive()
    }
}

/// The full derived output: one row per retained trading day.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DerivedSeries {
    rows: Vec<DerivedRow>,
}

impl DerivedSeries {
    /// Create a derived series from rows already in timestamp order.
    pub fn new(rows: Vec<DerivedRow>) -> Self {
        Self { rows }
    }

    /// Get the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all rows as a slice.
    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    /// Get the first row.
    pub fn first(&self) -> Option<&DerivedRow> {
        self.rows.first()
    }

    /// Get the last row.
    pub fn last(&self) -> Option<&DerivedRow> {
        self.rows.last()
    }

    /// Get an iterator over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &DerivedRow> {
        self.rows.iter()
    }
}

/// Complete output of one engine run. Created once, displayed, discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Ticker symbol
    pub symbol: String,
    /// Regime window length used
    pub window: usize,
    /// Band buffer fraction used
    pub buffer: f64,
    /// Benchmark total return, in percent
    pub buy_and_hold_return_pct: f64,
    /// Strategy total return, in percent
    pub strategy_return_pct: f64,
    /// Plottable per-day series
    pub series: DerivedSeries,
}
