//! Role management API

use crate::api::with_query;
use crate::client::Gatekit;
use crate::error::ClientResult;
use gatekit_types::{Paginated, Role, RoleCreate, RoleFilter, RoleUpdate};
use serde_json::json;

/// Typed client for role schema endpoints.
#[derive(Debug)]
pub struct RolesApi<'a> {
    client: &'a Gatekit,
}

impl<'a> RolesApi<'a> {
    pub(crate) fn new(client: &'a Gatekit) -> Self {
        Self { client }
    }

    /// List roles, paginated.
    pub async fn list(&self, filter: &RoleFilter) -> ClientResult<Paginated<Role>> {
        let url = with_query(
            &self.client.schema_url("/roles"),
            &[
                ("page", filter.page.map(|p| p.to_string())),
                ("perPage", filter.per_page.map(|p| p.to_string())),
                ("search", filter.search.clone()),
            ],
        );

        Ok(self.client.transport().get(&url).await?)
    }

    /// Fetch a role by key.
    pub async fn get(&self, role_key: &str) -> ClientResult<Role> {
        let url = self.client.schema_url(&format!("/roles/{role_key}"));
        Ok(self.client.transport().get(&url).await?)
    }

    /// Create a role.
    pub async fn create(&self, role: &RoleCreate) -> ClientResult<Role> {
        let url = self.client.schema_url("/roles");
        let body = serde_json::to_value(role).map_err(gatekit_http::HttpError::from)?;
        Ok(self.client.transport().post(&url, &body).await?)
    }

    /// Create or update a role (idempotent upsert).
    pub async fn sync(&self, role: &RoleCreate) -> ClientResult<Role> {
        let url = self.client.schema_url("/roles");
        let body = serde_json::to_value(role).map_err(gatekit_http::HttpError::from)?;
        Ok(self.client.transport().put(&url, &body).await?)
    }

    /// Partially update a role.
    pub async fn update(&self, role_key: &str, update: &RoleUpdate) -> ClientResult<Role> {
        let url = self.client.schema_url(&format!("/roles/{role_key}"));
        let body = serde_json::to_value(update).map_err(gatekit_http::HttpError::from)?;
        Ok(self.client.transport().patch(&url, &body).await?)
    }

    /// Delete a role.
    pub async fn delete(&self, role_key: &str) -> ClientResult<()> {
        let url = self.client.schema_url(&format!("/roles/{role_key}"));
        Ok(self.client.transport().delete(&url).await?)
    }

    /// Grant a permission to a role.
    pub async fn add_permission(&self, role_key: &str, permission: &str) -> ClientResult<()> {
        let url = self.client.schema_url(&format!("/roles/{role_key}/permissions"));
        let body = json!({ "permission": permission });
        Ok(self.client.transport().post_unit(&url, &body).await?)
    }

    /// Revoke a permission from a role.
    pub async fn remove_permission(&self, role_key: &str, permission: &str) -> ClientResult<()> {
        let url = self
            .client
            .schema_url(&format!("/roles/{role_key}/permissions/{permission}"));
        Ok(self.client.transport().delete(&url).await?)
    }

    /// Add a parent role to inherit from.
    pub async fn add_extends(&self, role_key: &str, parent_role_key: &str) -> ClientResult<()> {
        let url = self.client.schema_url(&format!("/roles/{role_key}/extends"));
        let body = json!({ "role": parent_role_key });
        Ok(self.client.transport().post_unit(&url, &body).await?)
    }

    /// Remove a parent role.
    pub async fn remove_extends(&self, role_key: &str, parent_role_key: &str) -> ClientResult<()> {
        let url = self
            .client
            .schema_url(&format!("/roles/{role_key}/extends/{parent_role_key}"));
        Ok(self.client.transport().delete(&url).await?)
    }
}
