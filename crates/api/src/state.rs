use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the client wraps a pooled `reqwest::Client`).
#[derive(Clone)]
pub struct AppState {
    /// Hosted data service client. Handlers bind it to the caller with
    /// [`AuthUser::conn`](crate::middleware::auth::AuthUser::conn).
    pub client: worldweaver_db::HostedClient,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
