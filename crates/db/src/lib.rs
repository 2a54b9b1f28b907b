//! Data access for WorldWeaver over the hosted data service.
//!
//! There is no local database: [`HostedClient`] talks to the service's REST
//! surface and each repository maps one table onto typed rows.

pub mod client;
pub mod models;
pub mod query;
pub mod repositories;

pub use client::{HostedClient, ServiceConn, ServiceError};

/// Check that the hosted service is reachable.
pub async fn health_check(client: &HostedClient) -> Result<(), ServiceError> {
    client.health_check().await
}
