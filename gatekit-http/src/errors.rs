//! HTTP error types and retry classification

use serde::Deserialize;
use thiserror::Error;

/// A structured error returned by the authorization service.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,

    /// Machine-readable error code, when the service provides one.
    pub code: Option<String>,

    /// Human-readable message, extracted best-effort from the body.
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {} (status: {})", code, self.message, self.status),
            None => write!(f, "{} (status: {})", self.message, self.status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Shape the service uses for error bodies. Anything else falls back
/// to the raw body text.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ApiError {
    /// Build an error from a non-2xx response body, best-effort.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);

        let (message, code) = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed
                    .message
                    .or(parsed.error)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| status_text(status).to_string());
                (message, parsed.code)
            }
            Err(_) => (text.into_owned(), None),
        };

        Self {
            status,
            code,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// `4xx` means the request itself is wrong; retrying cannot help.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

fn status_text(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network-level failure (connect, timeout, TLS, ...)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Structured non-2xx response from the service
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// 2xx response with an empty body where one was required
    #[error("unexpected empty response body")]
    EmptyBody,

    /// A configured header name or value is not valid HTTP
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl HttpError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Client errors (`4xx`) are returned immediately; network
    /// failures and server errors (`5xx`) are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::Api(err) => !err.is_client_error(),
            HttpError::Network(_) | HttpError::Decode(_) => true,
            HttpError::EmptyBody | HttpError::InvalidHeader(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_structured_error_body() {
        let err = ApiError::from_response(400, br#"{"message": "bad key", "code": "INVALID_KEY"}"#);
        assert_eq!(err.message, "bad key");
        assert_eq!(err.code.as_deref(), Some("INVALID_KEY"));
        assert_eq!(err.to_string(), "[INVALID_KEY] bad key (status: 400)");
    }

    #[test]
    fn falls_back_to_error_field_then_status_text() {
        let err = ApiError::from_response(403, br#"{"error": "nope"}"#);
        assert_eq!(err.message, "nope");

        let err = ApiError::from_response(404, br#"{}"#);
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = ApiError::from_response(502, b"upstream exploded");
        assert_eq!(err.message, "upstream exploded");
        assert!(err.code.is_none());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let err = HttpError::Api(ApiError::from_response(404, b"{}"));
        assert!(!err.is_retryable());

        let err = HttpError::Api(ApiError::from_response(500, b"{}"));
        assert!(err.is_retryable());
    }
}
