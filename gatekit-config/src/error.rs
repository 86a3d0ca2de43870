//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required field is missing or empty
    #[error("Missing required configuration: {0}")]
    MissingField(String),

    /// A field holds a value that fails validation
    #[error("Invalid configuration for {field}: {message}")]
    InvalidField { field: String, message: String },

    /// The API base URL does not parse
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ConfigError {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
