//! Error types for the tabprep pipeline

use thiserror::Error;

/// Result type alias for tabprep operations
pub type Result<T> = std::result::Result<T, TabprepError>;

/// Main error type for the tabprep pipeline
#[derive(Error, Debug)]
pub enum TabprepError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Transformer not fitted")]
    NotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },
}

impl From<polars::error::PolarsError> for TabprepError {
    fn from(err: polars::error::PolarsError) -> Self {
        TabprepError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for TabprepError {
    fn from(err: serde_json::Error) -> Self {
        TabprepError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for TabprepError {
    fn from(err: ndarray::ShapeError) -> Self {
        TabprepError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
