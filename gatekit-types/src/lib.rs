//! API types for the Gatekit authorization SDK
//!
//! This crate provides the wire-facing data models shared by the
//! transport layer and the SDK client: roles, role assignments,
//! permission-check requests and responses, API-key scope, and the
//! pagination envelope used by list endpoints.

pub mod assignments;
pub mod check;
pub mod pagination;
pub mod roles;
pub mod scope;

// Re-export main types for convenience
pub use assignments::{
    RoleAssignment, RoleAssignmentCreate, RoleAssignmentFilter, BulkAssignmentResponse,
};
pub use check::{CheckDebug, CheckRequest, CheckResponse, CheckResult, Resource, User, UserPermissions};
pub use pagination::Paginated;
pub use roles::{Role, RoleCreate, RoleFilter, RoleUpdate};
pub use scope::ApiKeyScope;
