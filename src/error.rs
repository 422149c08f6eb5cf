use chrono::{DateTime, FixedOffset};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("Invalid zone for station '{station}': zones start at 1")]
    InvalidZone { station: String },
    #[error("Taps for user '{user}' are out of order: {current} follows {previous}")]
    OutOfOrder {
        user: String,
        previous: DateTime<FixedOffset>,
        current: DateTime<FixedOffset>,
    },
    #[error("Billing worker failed: {0}")]
    WorkerError(String),
}

pub type Result<T> = std::result::Result<T, BillingError>;
