//! Regime strategy engine.
//!
//! Derives a binary position signal from a moving-average band with
//! hysteresis, applies it with a one-day lag, and attributes daily returns to
//! the strategy versus buy-and-hold.

mod engine;
mod report;
mod rolling;
mod signal;

pub use engine::{RegimeConfig, RegimeEngine};
pub use report::{BacktestReport, ResultDisplay};
pub use rolling::RollingMean;
pub use signal::HysteresisSignal;
