//! Core types and traits for the regime backtesting system.
//!
//! This crate provides the foundational building blocks including:
//! - Price series types (PricePoint, PriceSeries)
//! - Derived backtest output types (DerivedRow, DerivedSeries, BacktestResult)
//! - The error taxonomy
//! - Core traits for price providers and indicators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{RegimeError, RegimeResult};
pub use types::*;
pub use traits::*;
