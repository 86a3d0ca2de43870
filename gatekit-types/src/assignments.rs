//! Role assignment models
//!
//! A role assignment is a fact binding a user to a role, optionally
//! scoped to a tenant or a resource. The list endpoint returns a bare
//! JSON array rather than the usual pagination envelope.

use serde::{Deserialize, Serialize};

/// A role assignment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(default)]
    pub id: String,

    pub user: String,

    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_instance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for creating a role assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleAssignmentCreate {
    pub user: String,

    pub role: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_instance: Option<String>,
}

impl RoleAssignmentCreate {
    pub fn new(user: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            role: role.into(),
            ..Default::default()
        }
    }
}

/// Filter parameters for listing role assignments.
///
/// Empty fields are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct RoleAssignmentFilter {
    pub user: Option<String>,
    pub role: Option<String>,
    pub tenant: Option<String>,
    pub resource: Option<String>,
    pub resource_instance: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl RoleAssignmentFilter {
    /// Filter by user key.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Default::default()
        }
    }
}

/// Outcome of a bulk assign/unassign operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkAssignmentResponse {
    #[serde(default)]
    pub created: u32,

    #[serde(default)]
    pub failed: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BulkAssignmentError>,
}

/// A single failure from a bulk assignment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignmentError {
    pub assignment: RoleAssignmentCreate,
    pub error: String,
}
