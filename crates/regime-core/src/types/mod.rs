//! Core data types.

mod derived;
mod price;

pub use derived::{BacktestResult, DerivedRow, DerivedSeries, Position};
pub use price::{PricePoint, PriceSeries};
