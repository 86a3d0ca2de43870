//! Configuration for the Gatekit authorization SDK
//!
//! Provides the typed client configuration with defaults, a fluent
//! builder, and validation (API-key format, base URL, timeouts).

pub mod config;
pub mod error;

// Re-export main types
pub use config::{
    ClientConfig, ConfigBuilder, ErrorMode, API_KEY_PREFIX, DEFAULT_API_URL,
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_TIMEOUT,
};
pub use error::{ConfigError, ConfigResult};
