//! Client configuration and builder

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.gatekit.dev";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the initial attempt.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Required prefix for API keys, validated once at configuration time.
pub const API_KEY_PREFIX: &str = "gk_";

/// How evaluation calls react to transport failures.
///
/// This is a single client-wide policy, not a per-call switch:
/// `Strict` propagates the underlying error, `Lenient` (the default)
/// degrades to a denial carrying the error text in the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    Strict,
    #[default]
    Lenient,
}

/// SDK client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key used as a bearer token on every request.
    pub token: String,

    /// Base URL of the authorization service.
    pub api_url: String,

    /// Pre-configured project ID; bypasses scope discovery when both
    /// project and environment are set.
    pub project_id: Option<String>,

    /// Pre-configured environment ID.
    pub environment_id: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Retries after the initial attempt for retryable failures.
    pub retry_attempts: u32,

    /// Strict vs lenient handling of transport failures during
    /// evaluation.
    pub error_mode: ErrorMode,

    /// Extra headers merged into every request.
    pub custom_headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Create a configuration with defaults for the given API key.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            project_id: None,
            environment_id: None,
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            error_mode: ErrorMode::default(),
            custom_headers: HashMap::new(),
        }
    }

    /// The pre-configured `(project_id, environment_id)` pair, if both
    /// are set and non-empty.
    pub fn scope_ids(&self) -> Option<(&str, &str)> {
        match (&self.project_id, &self.environment_id) {
            (Some(p), Some(e)) if !p.is_empty() && !e.is_empty() => Some((p, e)),
            _ => None,
        }
    }

    /// Whether both project and environment IDs are known.
    pub fn has_scope(&self) -> bool {
        self.scope_ids().is_some()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.token.is_empty() {
            return Err(ConfigError::MissingField("token".to_string()));
        }

        if !self.token.starts_with(API_KEY_PREFIX) {
            return Err(ConfigError::invalid_field(
                "token",
                format!("API key must start with '{}'", API_KEY_PREFIX),
            ));
        }

        if self.api_url.is_empty() {
            return Err(ConfigError::MissingField("api_url".to_string()));
        }
        Url::parse(&self.api_url)?;

        if self.timeout.is_zero() {
            return Err(ConfigError::invalid_field("timeout", "must be positive"));
        }

        Ok(())
    }
}

/// Fluent builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(token),
        }
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Pre-configure the scope, bypassing discovery entirely.
    pub fn scope(
        mut self,
        project_id: impl Into<String>,
        environment_id: impl Into<String>,
    ) -> Self {
        self.config.project_id = Some(project_id.into());
        self.config.environment_id = Some(environment_id.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.config.retry_attempts = attempts;
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.config.error_mode = mode;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.custom_headers.insert(key.into(), value.into());
        self
    }

    /// Build without validating.
    pub fn build(self) -> ClientConfig {
        self.config
    }

    /// Build and validate.
    pub fn build_validated(self) -> ConfigResult<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
