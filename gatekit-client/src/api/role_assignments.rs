//! Role assignment API
//!
//! Assignment mutation endpoints are idempotent upserts server-side;
//! retried POST/DELETE calls are safe to re-send verbatim.

use crate::api::with_query;
use crate::client::Gatekit;
use crate::error::ClientResult;
use gatekit_types::{
    BulkAssignmentResponse, RoleAssignment, RoleAssignmentCreate, RoleAssignmentFilter,
};
use gatekit_http::{HttpError, Method};
use serde_json::json;

/// Typed client for role assignment facts endpoints.
#[derive(Debug)]
pub struct RoleAssignmentsApi<'a> {
    client: &'a Gatekit,
}

impl<'a> RoleAssignmentsApi<'a> {
    pub(crate) fn new(client: &'a Gatekit) -> Self {
        Self { client }
    }

    /// List role assignments matching the filter.
    ///
    /// The endpoint returns a bare array, not a pagination envelope.
    pub async fn list(&self, filter: &RoleAssignmentFilter) -> ClientResult<Vec<RoleAssignment>> {
        let url = with_query(
            &self.client.facts_url("/role_assignments"),
            &[
                ("user", filter.user.clone()),
                ("role", filter.role.clone()),
                ("tenant", filter.tenant.clone()),
                ("resource", filter.resource.clone()),
                ("resource_instance", filter.resource_instance.clone()),
                ("page", filter.page.map(|p| p.to_string())),
                ("perPage", filter.per_page.map(|p| p.to_string())),
            ],
        );

        Ok(self.client.transport().get(&url).await?)
    }

    /// Assign a role to a user.
    pub async fn assign(&self, assignment: &RoleAssignmentCreate) -> ClientResult<RoleAssignment> {
        let url = self.client.facts_url("/role_assignments");
        let body = serde_json::to_value(assignment).map_err(HttpError::from)?;
        Ok(self.client.transport().post(&url, &body).await?)
    }

    /// Remove a role assignment.
    pub async fn unassign(&self, assignment: &RoleAssignmentCreate) -> ClientResult<()> {
        let url = self.client.facts_url("/role_assignments");
        let body = serde_json::to_value(assignment).map_err(HttpError::from)?;
        Ok(self.client.transport().delete_with_body(&url, &body).await?)
    }

    /// Create multiple role assignments at once.
    pub async fn bulk_assign(
        &self,
        assignments: &[RoleAssignmentCreate],
    ) -> ClientResult<BulkAssignmentResponse> {
        let url = self.client.facts_url("/role_assignments/bulk");
        let body = json!({ "assignments": assignments });
        Ok(self.client.transport().post(&url, &body).await?)
    }

    /// Remove multiple role assignments at once.
    pub async fn bulk_unassign(
        &self,
        assignments: &[RoleAssignmentCreate],
    ) -> ClientResult<BulkAssignmentResponse> {
        let url = self.client.facts_url("/role_assignments/bulk");
        let body = json!({ "assignments": assignments });
        let response = self
            .client
            .transport()
            .request(Method::DELETE, &url, Some(&body))
            .await?
            .ok_or(HttpError::EmptyBody)?;
        Ok(response)
    }

    /// Whether the user holds the role, within the optional filter
    /// scope.
    pub async fn has_role(
        &self,
        user_key: &str,
        role_key: &str,
        filter: Option<RoleAssignmentFilter>,
    ) -> ClientResult<bool> {
        let mut filter = filter.unwrap_or_default();
        filter.user = Some(user_key.to_string());
        filter.role = Some(role_key.to_string());

        let assignments = self.list(&filter).await?;
        Ok(!assignments.is_empty())
    }

    /// Distinct role keys assigned to a user, in first-seen order.
    pub async fn get_user_roles(
        &self,
        user_key: &str,
        filter: Option<RoleAssignmentFilter>,
    ) -> ClientResult<Vec<String>> {
        let mut filter = filter.unwrap_or_default();
        filter.user = Some(user_key.to_string());

        let assignments = self.list(&filter).await?;

        let mut roles: Vec<String> = Vec::new();
        for assignment in &assignments {
            if !roles.contains(&assignment.role) {
                roles.push(assignment.role.clone());
            }
        }
        Ok(roles)
    }
}
