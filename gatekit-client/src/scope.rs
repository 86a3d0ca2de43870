//! Scope discovery
//!
//! The API-key scope (project and environment IDs) is required to
//! address scoped endpoints. It is resolved at most once per client
//! lifetime: either pre-configured, or fetched lazily from the
//! scope-discovery endpoint on first use.

use crate::client::Gatekit;
use crate::error::{ClientError, ClientResult};
use gatekit_types::ApiKeyScope;
use tracing::debug;

impl Gatekit {
    /// Eagerly resolve the API-key scope.
    ///
    /// Optional: every scoped call resolves the scope on demand. Call
    /// this at startup to fail fast on a bad credential. Unlike
    /// evaluation calls, scope resolution always propagates its error
    /// regardless of the configured error mode.
    pub async fn init(&self) -> ClientResult<()> {
        self.ensure_scope().await?;
        Ok(())
    }

    /// The resolved scope, fetching it if necessary.
    pub async fn scope(&self) -> ClientResult<&ApiKeyScope> {
        self.ensure_scope().await
    }

    /// Single-flight scope resolution.
    ///
    /// Concurrent first-callers collapse into one fetch; the cell is
    /// written exactly once by whichever task wins, and a loser whose
    /// own fetch would have failed still observes the winner's value.
    /// After the first success this is a lock-free read.
    pub(crate) async fn ensure_scope(&self) -> ClientResult<&ApiKeyScope> {
        self.scope
            .get_or_try_init(|| async {
                let url = self.api_url("/v1/api-key/scope");
                let scope: ApiKeyScope =
                    self.transport().get(&url).await.map_err(|err| {
                        ClientError::scope(format!(
                            "failed to fetch API key scope: {err}. Either provide \
                             project_id and environment_id in the config, or ensure \
                             the API key has valid scope"
                        ))
                    })?;

                debug!(
                    project_id = %scope.project_id,
                    environment_id = %scope.environment_id,
                    "auto-fetched API key scope"
                );
                Ok(scope)
            })
            .await
    }
}
