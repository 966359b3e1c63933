//! Error handling for the career matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Skill already exists: {0}")]
    DuplicateSkill(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, CareerMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CareerMatchError {
    fn from(err: anyhow::Error) -> Self {
        CareerMatchError::Processing(err.to_string())
    }
}

impl From<toml::de::Error> for CareerMatchError {
    fn from(err: toml::de::Error) -> Self {
        CareerMatchError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for CareerMatchError {
    fn from(err: toml::ser::Error) -> Self {
        CareerMatchError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
