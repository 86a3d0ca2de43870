//! Client-side permission evaluation
//!
//! Evaluation fetches the user's role assignments and the role
//! catalog, expands each assigned role through the inheritance graph,
//! and matches the required `"type:action"` permission with wildcard
//! support. Data is fetched fresh on every call; nothing is cached.

use crate::client::Gatekit;
use crate::error::{ClientError, ClientResult};
use crate::graph;
use gatekit_config::ErrorMode;
use gatekit_types::{
    CheckDebug, CheckRequest, CheckResponse, CheckResult, Resource, Role, RoleAssignmentFilter,
    RoleFilter, User, UserPermissions,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Page size for the single-page role-catalog fetch. Catalogs larger
/// than this are truncated; see the warning in `fetch_role_catalog`.
const ROLE_CATALOG_PAGE: u32 = 100;

/// The universal wildcard permission.
const WILDCARD_ALL: &str = "*:*";

impl Gatekit {
    /// Check whether a user may perform an action on a resource.
    pub async fn check(
        &self,
        user: &User,
        action: &str,
        resource: &Resource,
    ) -> ClientResult<bool> {
        Ok(self.check_with_details(user, action, resource).await?.allowed)
    }

    /// Check a permission and return the full decision with evidence.
    pub async fn check_with_details(
        &self,
        user: &User,
        action: &str,
        resource: &Resource,
    ) -> ClientResult<CheckResponse> {
        self.ensure_scope().await?;

        let required = format!("{}:{}", resource.resource_type, action);
        debug!(
            user = %user.key,
            action,
            resource = %resource.resource_type,
            %required,
            "evaluating permission check"
        );

        let mut filter = RoleAssignmentFilter::for_user(&user.key);
        filter.tenant = resource.tenant.clone();

        let assignments = match self.role_assignments().list(&filter).await {
            Ok(assignments) => assignments,
            Err(err) => {
                return self.absorb_or_raise(err, "Error fetching role assignments");
            }
        };

        if assignments.is_empty() {
            return Ok(CheckResponse::denied(format!(
                "User {} has no role assignments",
                user.key
            )));
        }

        let role_keys = distinct_roles(assignments.iter().map(|a| a.role.as_str()));
        debug!(roles = ?role_keys, "assigned roles");

        let catalog = match self.fetch_role_catalog().await {
            Ok(catalog) => catalog,
            Err(err) => {
                return self.absorb_or_raise(err, "Error fetching roles");
            }
        };

        let type_wildcard = format!("{}:*", resource.resource_type);
        let mut matched_roles = Vec::new();
        let mut matched_permissions = Vec::new();

        for role_key in &role_keys {
            let permissions = graph::expand_permissions(role_key, &catalog);
            let matched = permissions.iter().find(|p| {
                let p = p.as_str();
                p == required || p == type_wildcard || p == WILDCARD_ALL
            });

            if let Some(permission) = matched {
                matched_roles.push(role_key.clone());
                if !matched_permissions.contains(permission) {
                    matched_permissions.push(permission.clone());
                }
            }
        }

        let allowed = !matched_roles.is_empty();
        let reason = if allowed {
            format!("Granted by role(s): {}", matched_roles.join(", "))
        } else {
            format!("No role grants permission {required}")
        };

        debug!(allowed, matched = ?matched_roles, "permission check result");

        Ok(CheckResponse {
            allowed,
            reason,
            debug: Some(CheckDebug {
                matched_roles,
                matched_permissions,
            }),
        })
    }

    /// Fail-fast variant of [`check`](Self::check): a denied decision
    /// becomes an [`ClientError::AccessDenied`] error.
    pub async fn check_and_deny(
        &self,
        user: &User,
        action: &str,
        resource: &Resource,
    ) -> ClientResult<()> {
        let response = self.check_with_details(user, action, resource).await?;
        if response.allowed {
            return Ok(());
        }

        Err(ClientError::AccessDenied {
            user: user.key.clone(),
            action: action.to_string(),
            resource: resource.resource_type.clone(),
        })
    }

    /// Evaluate a batch of checks independently and sequentially.
    ///
    /// A failing item becomes a denial carrying the error text; it
    /// never aborts the batch. Output order matches input order.
    pub async fn bulk_check(&self, checks: Vec<CheckRequest>) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(checks.len());

        for check in checks {
            let user = User::new(&check.user);
            let mut resource = check.resource.clone();
            if let Some(tenant) = &check.tenant {
                resource.tenant = Some(tenant.clone());
            }

            let response = match self.check_with_details(&user, &check.action, &resource).await {
                Ok(response) => response,
                Err(err) => CheckResponse::denied(err.to_string()),
            };

            results.push(CheckResult {
                request: check,
                response,
            });
        }

        results
    }

    /// The full set of roles and permissions a user holds, optionally
    /// narrowed to a tenant or resource type.
    ///
    /// Empty results (no assignments, or a fetch failure in lenient
    /// mode) resolve to two empty sets rather than an error.
    pub async fn get_user_permissions(
        &self,
        user: &User,
        tenant: Option<&str>,
        resource: Option<&str>,
    ) -> ClientResult<UserPermissions> {
        self.ensure_scope().await?;

        let mut filter = RoleAssignmentFilter::for_user(&user.key);
        filter.tenant = tenant.map(str::to_string);
        filter.resource = resource.map(str::to_string);

        let assignments = match self.role_assignments().list(&filter).await {
            Ok(assignments) => assignments,
            Err(err) => return self.empty_or_raise(err),
        };

        if assignments.is_empty() {
            return Ok(UserPermissions::default());
        }

        let roles = distinct_roles(assignments.iter().map(|a| a.role.as_str()));

        let catalog = match self.fetch_role_catalog().await {
            Ok(catalog) => catalog,
            Err(err) => return self.empty_or_raise(err),
        };

        let mut permissions = Vec::new();
        for role_key in &roles {
            for permission in graph::expand_permissions(role_key, &catalog) {
                if !permissions.contains(&permission) {
                    permissions.push(permission);
                }
            }
        }

        Ok(UserPermissions { roles, permissions })
    }

    /// Fetch the role catalog as a key-indexed map.
    ///
    /// A single page of [`ROLE_CATALOG_PAGE`] roles; larger catalogs
    /// are truncated and logged rather than aggregated.
    async fn fetch_role_catalog(&self) -> ClientResult<HashMap<String, Role>> {
        let filter = RoleFilter {
            per_page: Some(ROLE_CATALOG_PAGE),
            ..Default::default()
        };

        let page = self.roles().list(&filter).await?;
        if page.is_truncated() {
            warn!(
                total = page.total,
                fetched = page.data.len(),
                "role catalog larger than one page; evaluation sees a truncated catalog"
            );
        }

        Ok(page
            .data
            .into_iter()
            .map(|role| (role.key.clone(), role))
            .collect())
    }

    /// Apply the client-wide error mode to a fetch failure: strict
    /// propagates, lenient degrades to a denial with the error text.
    fn absorb_or_raise(
        &self,
        err: ClientError,
        context: &str,
    ) -> ClientResult<CheckResponse> {
        match self.config().error_mode {
            ErrorMode::Strict => Err(err),
            ErrorMode::Lenient => {
                warn!(%err, "{context}; denying in lenient mode");
                Ok(CheckResponse::denied(format!("{context}: {err}")))
            }
        }
    }

    fn empty_or_raise(&self, err: ClientError) -> ClientResult<UserPermissions> {
        match self.config().error_mode {
            ErrorMode::Strict => Err(err),
            ErrorMode::Lenient => {
                warn!(%err, "permission listing failed; returning empty set in lenient mode");
                Ok(UserPermissions::default())
            }
        }
    }
}

/// Distinct role keys in first-seen order.
fn distinct_roles<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for key in keys {
        if !distinct.iter().any(|k| k == key) {
            distinct.push(key.to_string());
        }
    }
    distinct
}
