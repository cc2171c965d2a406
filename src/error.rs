use std::path::PathBuf;

use thiserror::Error;

/// Domain errors raised while configuring, loading or filtering trip data.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// The selected city has no configured source file.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// The month is not one of the configured months.
    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    /// The day is not a weekday name.
    #[error("Unknown day of week: {0}")]
    UnknownDay(String),

    /// A required column is absent from the source file.
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    /// A `Start Time` cell could not be parsed as a date-time.
    #[error("{path}, row {row}: cannot parse '{value}' as a timestamp")]
    Timestamp {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// A numeric cell could not be parsed.
    #[error("{path}, row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// The file extension does not map to a supported reader.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}
