use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod models;
mod response;
mod routes;
mod steam;

#[derive(Clone)]
pub struct SharedAppState {
    pub api_key: Arc<str>,
    pub steam: steam::SteamClient,
}

pub fn build_router(state: SharedAppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes(state.clone()))
        .fallback(routes::handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "steam_api_proxy=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let version = env!("CARGO_PKG_VERSION");
    tracing::info!("🎮 Steam API Proxy v{}", version);

    let config = config::Config::from_env()?;
    tracing::info!("Steam API: {}", config.steam_api_url);

    let steam = steam::SteamClient::new(&config.steam_api_url, config.steam_api_timeout)
        .context("Failed to create HTTP client")?;

    let state = SharedAppState {
        api_key: config.steam_api_key.clone(),
        steam,
    };

    let app = build_router(state);

    // run it
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    tracing::info!("🚀 Fast serving at: http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("👋 Bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
