//! Network and identity boundary: HTTP helpers, the identity-provider
//! gateway, and the session client that ties them to UI state.

pub mod api;
pub mod auth_client;
#[cfg(feature = "hydrate")]
pub mod firebase;
pub mod identity;
pub mod types;
