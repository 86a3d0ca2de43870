//! Role models
//!
//! A role is a named bundle of permission strings. Roles may extend
//! other roles, inheriting their permissions; the `extends` edges form
//! a directed graph over role keys that is *not* guaranteed to be
//! acyclic by the server.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A role as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: String,

    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permission strings in `"type:action"` form.
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Keys of parent roles this role inherits from, in declaration order.
    #[serde(default)]
    pub extends: Vec<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for creating (or upserting) a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCreate {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl RoleCreate {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

/// Payload for a partial role update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
}

/// Filter parameters for listing roles.
#[derive(Debug, Clone, Default)]
pub struct RoleFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}
