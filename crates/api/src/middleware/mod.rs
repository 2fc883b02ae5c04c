//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the same, for routes that also serve anonymous
//!   callers.

pub mod auth;
