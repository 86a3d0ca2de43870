//! The SDK client

use crate::api::{RoleAssignmentsApi, RolesApi};
use crate::error::ClientResult;
use gatekit_config::ClientConfig;
use gatekit_http::Transport;
use gatekit_types::ApiKeyScope;
use tokio::sync::OnceCell;

/// Client for the Gatekit authorization service.
///
/// Holds the configuration, the shared transport, and the lazily
/// resolved API-key scope. All evaluation state is call-local, so a
/// single client (typically behind an `Arc`) serves any number of
/// concurrent callers.
#[derive(Debug)]
pub struct Gatekit {
    config: ClientConfig,
    transport: Transport,
    pub(crate) scope: OnceCell<ApiKeyScope>,
}

impl Gatekit {
    /// Create a client from a validated configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let transport = Transport::new(&config)?;

        // Pre-configured scope bypasses discovery entirely.
        let scope = match config.scope_ids() {
            Some((project, environment)) => OnceCell::new_with(Some(ApiKeyScope {
                project_id: project.to_string(),
                environment_id: environment.to_string(),
            })),
            None => OnceCell::new(),
        };

        Ok(Self {
            config,
            transport,
            scope,
        })
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Role management API.
    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(self)
    }

    /// Role assignment API.
    pub fn role_assignments(&self) -> RoleAssignmentsApi<'_> {
        RoleAssignmentsApi::new(self)
    }

    /// Absolute URL for an unscoped API path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// URL for a facts endpoint (role assignments and other runtime
    /// data), scoped when the scope is known.
    pub(crate) fn facts_url(&self, path: &str) -> String {
        match self.scope.get() {
            Some(scope) => format!(
                "{}/v1/facts/{}/{}{}",
                self.config.api_url, scope.project_id, scope.environment_id, path
            ),
            None => format!("{}/v1{}", self.config.api_url, path),
        }
    }

    /// URL for a schema endpoint (role definitions), scoped when the
    /// scope is known.
    pub(crate) fn schema_url(&self, path: &str) -> String {
        match self.scope.get() {
            Some(scope) => format!(
                "{}/v1/schema/{}/{}{}",
                self.config.api_url, scope.project_id, scope.environment_id, path
            ),
            None => format!("{}/v1{}", self.config.api_url, path),
        }
    }
}
