//! Regime backtest engine.

use regime_core::error::EngineError;
use regime_core::traits::Indicator;
use regime_core::types::{BacktestResult, DerivedRow, DerivedSeries, Position, PriceSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rolling::RollingMean;
use crate::signal::HysteresisSignal;

/// Engine configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Regime window length in trading days
    pub window: usize,
    /// Band buffer as a fraction of the regime mean
    pub buffer: f64,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            window: 200,
            buffer: 0.02,
        }
    }
}

impl RegimeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window < 2 {
            return Err(EngineError::InvalidParameter(
                "Window must be at least 2".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.buffer) {
            return Err(EngineError::InvalidParameter(
                "Buffer must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Regime strategy engine.
///
/// A pure, single-pass transformation: one input series in, one
/// [`BacktestResult`] out. Nothing is cached between runs.
pub struct RegimeEngine {
    config: RegimeConfig,
}

impl RegimeEngine {
    /// Create a new engine.
    pub fn new(config: RegimeConfig) -> Self {
        Self { config }
    }

    /// Run the backtest over a price series.
    ///
    /// The signal recurrence starts at index `window` (the first index whose
    /// previous day has defined bands); the position held on a day is the
    /// previous day's signal, so the first reportable row is index
    /// `window + 1`. Rows are dropped first, then both cumulative products
    /// are anchored to the first remaining row.
    pub fn run(&self, series: &PriceSeries) -> Result<BacktestResult, EngineError> {
        self.config.validate()?;

        if series.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        let w = self.config.window;
        let b = self.config.buffer;
        let n = series.len();
        let first = w + 1;

        // Need at least one row past warm-up and lag.
        if n <= first {
            return Err(EngineError::InsufficientHistory {
                required: first + 1,
                available: n,
            });
        }

        let closes = series.closes();
        let means = RollingMean::new(w).calculate(&closes);

        // Signal scan, strictly left to right; implicit flat before `w`.
        let mut signal = vec![Position::Flat; n];
        let mut hysteresis = HysteresisSignal::new(b);
        for i in w..n {
            signal[i] = hysteresis.update(closes[i], means[i]);
        }

        let mut rows = Vec::with_capacity(n - first);
        let mut buy_hold_cumulative = 1.0;
        let mut strategy_cumulative = 1.0;

        for i in first..n {
            let daily_return = closes[i] / closes[i - 1] - 1.0;
            let applied_signal = signal[i - 1];
            let strategy_return = daily_return * applied_signal.weight();

            buy_hold_cumulative *= 1.0 + daily_return;
            strategy_cumulative *= 1.0 + strategy_return;

            rows.push(DerivedRow {
                timestamp: series.points()[i].timestamp,
                price: closes[i],
                regime_mean: means[i],
                upper_band: means[i] * (1.0 + b),
                lower_band: means[i] * (1.0 - b),
                signal: signal[i],
                applied_signal,
                daily_return,
                strategy_return,
                buy_hold_cumulative,
                strategy_cumulative,
            });
        }

        debug!(
            symbol = %series.symbol,
            rows = rows.len(),
            window = w,
            "backtest complete"
        );

        Ok(BacktestResult {
            symbol: series.symbol.clone(),
            window: w,
            buffer: b,
            buy_and_hold_return_pct: (buy_hold_cumulative - 1.0) * 100.0,
            strategy_return_pct: (strategy_cumulative - 1.0) * 100.0,
            series: DerivedSeries::new(rows),
        })
    }
}
