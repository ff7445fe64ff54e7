// Main entry point for API server

use anyhow::{Context, Result};
use shelfgate::common::auth::{bootstrap, PolicyRegistry};
use shelfgate::domains::auth::JwtService;
use shelfgate::server::{build_app, AppState};
use shelfgate::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shelfgate=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting shelfgate API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Provision the authorization policy before any request can reach the gate
    let registry = Arc::new(PolicyRegistry::new());
    let policy = bootstrap::provision(&registry, config.policy_path.as_deref())
        .context("Failed to provision authorization policy")?;
    tracing::info!(roles = policy.roles().count(), "Authorization policy ready");

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let app = build_app(AppState::new(registry, jwt_service));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
