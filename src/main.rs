//! Group Cache - A distributed read-through cache node
//!
//! Serves the demo `scores` group to clients and to its peers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use group_cache::{api::create_router, AppState, Config, GroupRegistry, HttpPool, LoaderFn};

/// Main entry point for a cache node.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Register the `scores` group backed by a slow in-memory table
/// 4. Build the peer pool and attach it to the group
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "group_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting group cache node");

    let config = Config::from_env();
    info!(
        "Configuration loaded: self={}, peers={:?}, cache_bytes={}, replicas={}, peer_timeout_ms={}, port={}",
        config.self_addr,
        config.peers,
        config.cache_bytes,
        config.replicas,
        config.peer_timeout_ms,
        config.server_port
    );

    let registry = Arc::new(GroupRegistry::new());
    let scores = registry.new_group("scores", config.cache_bytes, Arc::new(scores_loader()))?;

    let pool = HttpPool::new(config.self_addr.clone(), config.replicas, config.peer_timeout())
        .context("failed to build peer client")?;
    let pool = Arc::new(pool);
    pool.set_peers(&config.peers);
    scores.register_peers(pool)?;

    let app = create_router(AppState::new(registry));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Node listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Node shutdown complete");
    Ok(())
}

/// Loader over a fixed table standing in for a slow database.
fn scores_loader() -> LoaderFn<impl Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync> {
    let db: HashMap<&'static str, &'static str> =
        HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")]);

    LoaderFn(move |key: &str| -> anyhow::Result<Vec<u8>> {
        info!(key, "[SlowDB] search key");
        db.get(key)
            .map(|score| score.as_bytes().to_vec())
            .ok_or_else(|| anyhow::anyhow!("{} not exist", key))
    })
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
