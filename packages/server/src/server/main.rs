// Main entry point for API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use appwrite::{AppwriteClient, AppwriteOptions};
use server_core::kernel::{DirectoryConfig, ServerDeps};
use server_core::server::{build_app, AppOptions};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,appwrite=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting storage API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    if !config.cookie_secure {
        tracing::warn!("COOKIE_SECURE is false; session cookies will be sent over plain HTTP");
    }

    // One backend client shared by every request
    let appwrite = AppwriteClient::new(
        AppwriteOptions::new(
            config.appwrite_endpoint.clone(),
            config.appwrite_project_id.clone(),
            config.appwrite_api_key.clone(),
        )
        .with_timeout(Duration::from_secs(config.appwrite_timeout_secs)),
    )
    .context("Failed to build Appwrite client")?;
    tracing::info!(endpoint = %config.appwrite_endpoint, "Appwrite client ready");

    let deps = ServerDeps::from_appwrite(
        Arc::new(appwrite),
        DirectoryConfig {
            database_id: config.database_id.clone(),
            users_collection_id: config.users_collection_id.clone(),
        },
        config.avatar_placeholder_url.clone(),
        config.cookie_secure,
    );

    // Build application
    let app = build_app(
        deps,
        AppOptions {
            rate_limit_enabled: config.rate_limit_enabled,
            allowed_origins: config.allowed_origins.clone(),
        },
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
