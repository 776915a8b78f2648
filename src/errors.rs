use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type for the few failures that are caller bugs or environment problems.
///
/// Bad user input (selectors, dates, malformed records) never produces one of these;
/// it degrades to a default instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
