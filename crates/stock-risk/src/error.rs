//! Error types for risk and statistics operations

use thiserror::Error;

/// Risk analysis specific errors
#[derive(Debug, Error)]
pub enum RiskError {
    /// Too few samples for the requested statistic
    #[error("Insufficient data for {context}: need at least {needed} samples, got {actual}")]
    InsufficientData {
        context: String,
        needed: usize,
        actual: usize,
    },

    /// Pairwise statistic over series that do not share the same dates
    #[error("Alignment error: {0}")]
    AlignmentError(String),

    /// Parameter outside its valid domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Statistic undefined for the given input, e.g. zero variance
    #[error("Undefined statistic: {0}")]
    UndefinedStatistic(String),

    /// Price series violating its invariants
    #[error("Invalid series for {ticker}: {reason}")]
    InvalidSeries {
        ticker: String,
        reason: String,
    },

    /// Data not available for the requested ticker
    #[error("Data not available for {ticker}: {reason}")]
    DataUnavailable {
        ticker: String,
        reason: String,
    },

    /// Market-data provider failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RiskError {
    pub(crate) fn insufficient(context: impl Into<String>, needed: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            needed,
            actual,
        }
    }
}

impl From<stock_utils::ConfigError> for RiskError {
    fn from(err: stock_utils::ConfigError) -> Self {
        RiskError::Config(err.to_string())
    }
}

/// Result type alias for risk operations
pub type Result<T> = std::result::Result<T, RiskError>;
