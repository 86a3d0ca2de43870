//! Permission check models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The principal a permission check is evaluated for.
///
/// Attributes are forwarded to the service where relevant but are never
/// evaluated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub key: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl User {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: HashMap::new(),
        }
    }
}

/// The resource a permission check targets.
///
/// For client-side evaluation the identity is `(type, tenant)`; the
/// instance key is carried along but not matched against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            key: None,
            tenant: None,
            attributes: HashMap::new(),
        }
    }

    /// Scope the resource to a tenant.
    pub fn in_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }
}

/// One item of a bulk permission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub user: String,

    pub action: String,

    pub resource: Resource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}

/// The outcome of a permission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub allowed: bool,

    #[serde(default)]
    pub reason: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<CheckDebug>,
}

impl CheckResponse {
    /// A denial carrying only a reason, used when evaluation degrades
    /// instead of failing.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
            debug: None,
        }
    }
}

/// Evidence supporting a decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDebug {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_roles: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_permissions: Vec<String>,
}

/// One entry of a bulk check response, pairing the request with its
/// decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub request: CheckRequest,
    pub response: CheckResponse,
}

/// The full set of roles and permissions a user holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPermissions {
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub permissions: Vec<String>,
}
