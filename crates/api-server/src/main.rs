//! API Server for the task dashboard
//!
//! This is the main entry point for the Rust backend.
//! It provides the REST API on port 3000 by default.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_server::config::ServerConfig;
use api_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,td_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let state = AppState::new(&config);
    if config.seed_on_start {
        let count = state.tasks().seed().await?;
        tracing::info!("Seeded {} demo tasks", count);
    }

    let app = api_server::build_app(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("REST API listening on {}", addr);
    tracing::info!("Demo accounts: admin@test.com / Admin@123, user@test.com / User@123");

    api_server::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
