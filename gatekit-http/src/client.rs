//! HTTP transport implementation
//!
//! All API calls (the evaluator's data fetches included) go through
//! [`Transport::request`], which injects credentials and headers,
//! retries transient failures with quadratic backoff, and converts
//! non-2xx responses into structured [`ApiError`]s.

use crate::backoff;
use crate::errors::{ApiError, HttpError};
use gatekit_config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Resilient HTTP executor for the authorization service.
///
/// Cheap to clone; the underlying reqwest client shares its connection
/// pool across clones.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    token: String,
    custom_headers: HeaderMap,
    retry_attempts: u32,
}

impl Transport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let mut custom_headers = HeaderMap::new();
        for (key, value) in &config.custom_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| HttpError::InvalidHeader(key.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidHeader(key.clone()))?;
            custom_headers.insert(name, value);
        }

        Ok(Self {
            client,
            token: config.token.clone(),
            custom_headers,
            retry_attempts: config.retry_attempts,
        })
    }

    /// Execute a request, retrying transient failures.
    ///
    /// Returns `Ok(None)` for a 2xx response with an empty body.
    /// Client errors (`4xx`) short-circuit immediately; network
    /// failures and `5xx` responses are retried up to the configured
    /// budget, with `attempt² × 100ms` between attempts. The backoff
    /// sleep is cancel-safe: dropping the returned future abandons the
    /// retry loop at once.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&JsonValue>,
    ) -> Result<Option<T>, HttpError> {
        let mut attempt: u32 = 0;

        loop {
            match self.send(method.clone(), url, body).await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(%url, attempt = attempt + 1, "request succeeded after retry");
                    }
                    return Ok(result);
                }
                Err(err) => {
                    if !err.is_retryable() || attempt >= self.retry_attempts {
                        return Err(err);
                    }
                    attempt += 1;
                    let delay = backoff::delay_for_attempt(attempt);
                    warn!(%url, %err, attempt, ?delay, "request failed, retrying");
                    sleep(delay).await;
                }
            }
        }
    }

    /// A single request/response cycle.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&JsonValue>,
    ) -> Result<Option<T>, HttpError> {
        debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.token)
            .headers(self.custom_headers.clone());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(status = status.as_u16(), len = bytes.len(), "received response");

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &bytes).into());
        }

        if bytes.is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// GET, decoding the response body.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.request(Method::GET, url, None)
            .await?
            .ok_or(HttpError::EmptyBody)
    }

    /// POST with a JSON body, decoding the response.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &JsonValue,
    ) -> Result<T, HttpError> {
        self.request(Method::POST, url, Some(body))
            .await?
            .ok_or(HttpError::EmptyBody)
    }

    /// POST with a JSON body, ignoring any response body.
    pub async fn post_unit(&self, url: &str, body: &JsonValue) -> Result<(), HttpError> {
        self.request::<JsonValue>(Method::POST, url, Some(body))
            .await?;
        Ok(())
    }

    /// PUT with a JSON body, decoding the response.
    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &JsonValue,
    ) -> Result<T, HttpError> {
        self.request(Method::PUT, url, Some(body))
            .await?
            .ok_or(HttpError::EmptyBody)
    }

    /// PATCH with a JSON body, decoding the response.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &JsonValue,
    ) -> Result<T, HttpError> {
        self.request(Method::PATCH, url, Some(body))
            .await?
            .ok_or(HttpError::EmptyBody)
    }

    /// DELETE, ignoring any response body.
    pub async fn delete(&self, url: &str) -> Result<(), HttpError> {
        self.request::<JsonValue>(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// DELETE with a JSON body, ignoring any response body.
    pub async fn delete_with_body(&self, url: &str, body: &JsonValue) -> Result<(), HttpError> {
        self.request::<JsonValue>(Method::DELETE, url, Some(body))
            .await?;
        Ok(())
    }
}
