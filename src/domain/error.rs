//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for quotefolio.
#[derive(Debug, thiserror::Error)]
pub enum QuotefolioError {
    #[error("malformed date {value:?}: {reason}")]
    MalformedDate { value: String, reason: String },

    #[error("malformed price on {date}: field {field:?} has value {value:?}")]
    MalformedPrice {
        date: String,
        field: String,
        value: String,
    },

    #[error("duplicate date in series: {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("insufficient data: have {points} points, need {period}")]
    InsufficientData { points: usize, period: usize },

    #[error("invalid period {period}: must be positive")]
    InvalidPeriod { period: usize },

    #[error("invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("invalid holding {symbol:?}: {reason}")]
    InvalidHolding { symbol: String, reason: String },

    #[error("{symbol} already exists in the portfolio")]
    DuplicateHolding { symbol: String },

    #[error("{symbol} is not in the portfolio")]
    HoldingNotFound { symbol: String },

    #[error("portfolio store error: {reason}")]
    Store { reason: String },

    #[error("market data error for {symbol}: {reason}")]
    Provider { symbol: String, reason: String },

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
    Io(#[from] std::io::Error),
}

impl From<&QuotefolioError> for std::process::ExitCode {
    fn from(err: &QuotefolioError) -> Self {
        let code: u8 = match err {
            QuotefolioError::Io(_) => 1,
            QuotefolioError::ConfigParse { .. }
            | QuotefolioError::ConfigMissing { .. }
            | QuotefolioError::ConfigInvalid { .. } => 2,
            QuotefolioError::Store { .. } | QuotefolioError::Provider { .. } => 3,
            QuotefolioError::InvalidHolding { .. }
            | QuotefolioError::DuplicateHolding { .. }
            | QuotefolioError::HoldingNotFound { .. } => 4,
            QuotefolioError::MalformedDate { .. }
            | QuotefolioError::MalformedPrice { .. }
            | QuotefolioError::DuplicateDate { .. }
            | QuotefolioError::InsufficientData { .. }
            | QuotefolioError::InvalidPeriod { .. }
            | QuotefolioError::InvalidPrice { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
