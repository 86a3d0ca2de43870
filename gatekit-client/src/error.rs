//! SDK error types

use gatekit_config::ConfigError;
use gatekit_http::HttpError;
use thiserror::Error;

/// Result type for SDK operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the SDK client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid client configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport failure (network, decode, or structured API error)
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Scope could not be discovered and none was pre-configured
    #[error("{message}")]
    Scope { message: String },

    /// Raised only by the fail-fast check variant on a denied decision
    #[error("Access denied: user {user} is not allowed to perform {action} on {resource}")]
    AccessDenied {
        user: String,
        action: String,
        resource: String,
    },
}

impl ClientError {
    pub(crate) fn scope(message: impl Into<String>) -> Self {
        Self::Scope {
            message: message.into(),
        }
    }

    /// Whether this is the fail-fast denial error.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// The API status code, when the failure was a structured API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(HttpError::Api(api)) => Some(api.status),
            _ => None,
        }
    }
}
