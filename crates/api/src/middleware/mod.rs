//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a session Bearer token.

pub mod auth;
