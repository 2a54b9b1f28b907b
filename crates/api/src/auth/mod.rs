//! Authentication primitives.
//!
//! Sessions are issued by the hosted auth service; this server only
//! verifies them.
//!
//! - [`jwt`] -- Session token validation.

pub mod jwt;
