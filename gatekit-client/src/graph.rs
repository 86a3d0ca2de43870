//! Role-inheritance graph expansion
//!
//! Roles inherit permissions through `extends` edges. The server does
//! not guarantee the graph is acyclic, so expansion never trusts the
//! data: a visited set bounds the traversal, and a cycle simply stops
//! contributing once a role key repeats.

use gatekit_types::Role;
use std::collections::{HashMap, HashSet};

/// Expand a role to its full permission set, following `extends`
/// transitively.
///
/// The result is de-duplicated and ordered first-seen: the role's own
/// permissions, then each parent's expansion in declaration order.
/// Unknown role keys contribute nothing. Cycle-safe.
pub fn expand_permissions(role_key: &str, catalog: &HashMap<String, Role>) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut seen = HashSet::new();
    let mut permissions = Vec::new();

    expand_into(role_key, catalog, &mut visited, &mut seen, &mut permissions);
    permissions
}

fn expand_into(
    role_key: &str,
    catalog: &HashMap<String, Role>,
    visited: &mut HashSet<String>,
    seen: &mut HashSet<String>,
    permissions: &mut Vec<String>,
) {
    // A repeated key means a cycle or a shared ancestor; either way
    // this branch has nothing further to add.
    if !visited.insert(role_key.to_string()) {
        return;
    }

    let Some(role) = catalog.get(role_key) else {
        return;
    };

    for permission in &role.permissions {
        if seen.insert(permission.clone()) {
            permissions.push(permission.clone());
        }
    }

    for parent in &role.extends {
        expand_into(parent, catalog, visited, seen, permissions);
    }
}
