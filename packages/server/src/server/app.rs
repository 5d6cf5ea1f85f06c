//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::with_auth_rate_limit;
use crate::server::routes::{
    current_user_handler, health_handler, navigation_handler, sign_in_handler, sign_out_handler,
    sign_up_handler, verify_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Router-level switches that do not belong to the workflows
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub rate_limit_enabled: bool,
    /// Origins allowed to call the API with credentials. Empty means any
    /// origin, without credentials.
    pub allowed_origins: Vec<String>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Cookies only travel cross-origin with credentials enabled
    base.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    let mut auth_routes = Router::new()
        .route("/api/auth/sign-up", post(sign_up_handler))
        .route("/api/auth/sign-in", post(sign_in_handler))
        .route("/api/auth/verify", post(verify_handler))
        .route("/api/auth/sign-out", post(sign_out_handler));

    if options.rate_limit_enabled {
        auth_routes = with_auth_rate_limit(auth_routes);
    }

    Router::new()
        .merge(auth_routes)
        .route("/api/users/me", get(current_user_handler))
        .route("/api/navigation", get(navigation_handler))
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
