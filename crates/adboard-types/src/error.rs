use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding or validating report data
#[derive(Debug, Error)]
pub enum Error {
    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Start date is after end date
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Date string did not match YYYY-MM-DD
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}
