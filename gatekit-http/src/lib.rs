//! Resilient HTTP transport for the Gatekit authorization SDK
//!
//! This crate provides the retryable executor every API call runs
//! through: credential and header injection, bounded retry with
//! quadratic backoff, client-error short-circuiting, and best-effort
//! structured decoding of error responses.

pub mod backoff;
pub mod client;
pub mod errors;

// Re-export main types for convenience
pub use client::Transport;
pub use errors::{ApiError, HttpError};
pub use reqwest::Method;
