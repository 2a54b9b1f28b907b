//! HTTP API for WorldWeaver.
//!
//! Handlers validate input with the `worldweaver_core` rules and then call
//! the hosted data service as the signed-in user, so the service's row-level
//! policies still apply.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
