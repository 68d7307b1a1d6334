//! Error types for the regime backtesting system.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum RegimeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RegimeError {
    /// Whether this error means "no usable rows" rather than a failed
    /// retrieval. Callers present both with the same user message.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            RegimeError::Data(DataError::Empty)
                | RegimeError::Engine(EngineError::EmptySeries)
                | RegimeError::Engine(EngineError::InsufficientHistory { .. })
        )
    }
}

/// Price provider errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider returned no rows")]
    Empty,

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Regime engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Insufficient history: need {required} rows, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for regime operations.
pub type RegimeResult<T> = Result<T, RegimeError>;
