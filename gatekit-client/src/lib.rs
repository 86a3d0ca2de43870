//! Client SDK for the Gatekit authorization service
//!
//! Permission checks are evaluated client-side: the SDK fetches the
//! user's role assignments and the role catalog, expands role
//! inheritance (cycle-safe), and matches `"type:action"` permission
//! strings with `"type:*"` and `"*:*"` wildcard support. The
//! project/environment scope of the API key is discovered lazily and
//! resolved at most once per client.
//!
//! ```no_run
//! use gatekit_client::{ConfigBuilder, Gatekit};
//! use gatekit_client::types::{Resource, User};
//!
//! # async fn run() -> Result<(), gatekit_client::ClientError> {
//! let config = ConfigBuilder::new("gk_your_api_key").build_validated()?;
//! let client = Gatekit::new(config)?;
//!
//! let user = User::new("alice");
//! let document = Resource::new("document").in_tenant("acme");
//! if client.check(&user, "read", &document).await? {
//!     // proceed
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod graph;

mod check;
mod scope;

/// Wire-facing data models.
pub use gatekit_types as types;

// Re-export main types for convenience
pub use client::Gatekit;
pub use error::{ClientError, ClientResult};
pub use gatekit_config::{ClientConfig, ConfigBuilder, ErrorMode};
pub use gatekit_http::{ApiError, HttpError};
