use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worldweaver_api::config::ServerConfig;
use worldweaver_api::router::build_app_router;
use worldweaver_api::state::AppState;
use worldweaver_db::HostedClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worldweaver_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Hosted service ---
    let client = HostedClient::new(&config.service.url, &config.service.anon_key);
    match worldweaver_db::health_check(&client).await {
        Ok(()) => tracing::info!(url = %client.base_url(), "Hosted service health check passed"),
        // The service may come up after us; /health keeps reporting it.
        Err(err) => tracing::warn!(
            url = %client.base_url(),
            error = %err,
            "Hosted service health check failed",
        ),
    }

    // --- App state ---
    let state = AppState {
        client,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let draining = Arc::new(Notify::new());
    let signal = {
        let draining = Arc::clone(&draining);
        async move {
            shutdown_signal().await;
            draining.notify_one();
        }
    };

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
    });

    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let finished = tokio::select! {
        result = &mut server => Some(result),
        () = draining.notified() => tokio::time::timeout(drain_timeout, &mut server).await.ok(),
    };

    match finished {
        Some(Ok(Ok(()))) => tracing::info!("Graceful shutdown complete"),
        Some(Ok(Err(err))) => tracing::error!(error = %err, "Server error"),
        Some(Err(err)) => tracing::error!(error = %err, "Server task failed"),
        None => {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout_secs,
                "Requests still in flight after shutdown timeout, exiting"
            );
            server.abort();
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
