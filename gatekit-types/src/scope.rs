//! API-key scope

use serde::{Deserialize, Serialize};

/// The project/environment pair an API key addresses.
///
/// Returned by the scope-discovery endpoint and resolved at most once
/// per client lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyScope {
    pub project_id: String,
    pub environment_id: String,
}
