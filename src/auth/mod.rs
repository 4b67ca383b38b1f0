//! Authentication module
//!
//! Supports: Bearer tokens, OAuth2 Client Credentials, OAuth2 Refresh Token
//!
//! The `Authenticator` injects the bearer token into each request and manages
//! token caching for the OAuth2 flows.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, TOKEN_URL};
