//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for goldcross.
#[derive(Debug, thiserror::Error)]
pub enum GoldcrossError {
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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {code} on {exchange}")]
    NoData { code: String, exchange: String },

    #[error("empty bar series")]
    EmptySeries,

    #[error("non-positive {field} {value} at bar {index} ({date})")]
    NonPositivePrice {
        field: &'static str,
        value: f64,
        index: usize,
        date: NaiveDate,
    },

    #[error("duplicate date at bar {index} ({date})")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("out-of-order date at bar {index} ({date} follows {prev})")]
    OutOfOrderDate {
        index: usize,
        date: NaiveDate,
        prev: NaiveDate,
    },

    #[error("signal series length {signals} does not match bar series length {bars}")]
    SeriesMismatch { bars: usize, signals: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GoldcrossError> for std::process::ExitCode {
    fn from(err: &GoldcrossError) -> Self {
        let code: u8 = match err {
            GoldcrossError::Io(_) => 1,
            GoldcrossError::ConfigParse { .. }
            | GoldcrossError::ConfigMissing { .. }
            | GoldcrossError::ConfigInvalid { .. } => 2,
            GoldcrossError::Data { .. } | GoldcrossError::NoData { .. } => 3,
            GoldcrossError::EmptySeries
            | GoldcrossError::NonPositivePrice { .. }
            | GoldcrossError::DuplicateDate { .. }
            | GoldcrossError::OutOfOrderDate { .. }
            | GoldcrossError::SeriesMismatch { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
