//! Domain error types.

/// Domain-validation error for a single signal evaluation.
///
/// Fatal only to that day's computation: the backtest driver records
/// the failure and moves to the next date with the ledger untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("RSI must be between 0 and 100, got {0}")]
    RsiOutOfRange(f64),

    #[error("ADX must be between 0 and 100, got {0}")]
    AdxOutOfRange(f64),

    #[error("sentiment score must be between -100 and 100, got {0}")]
    SentimentOutOfRange(f64),

    #[error("P/E ratio must be positive, got {0}")]
    NonPositivePe(f64),
}

/// Top-level error type for sentibt.
#[derive(Debug, thiserror::Error)]
pub enum SentibtError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("no price data for {ticker}")]
    NoData { ticker: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SentibtError> for std::process::ExitCode {
    fn from(err: &SentibtError) -> Self {
        let code: u8 = match err {
            SentibtError::Io(_) => 1,
            SentibtError::ConfigParse { .. }
            | SentibtError::ConfigMissing { .. }
            | SentibtError::ConfigInvalid { .. } => 2,
            SentibtError::Data { .. } => 3,
            SentibtError::Signal(_) => 4,
            SentibtError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
