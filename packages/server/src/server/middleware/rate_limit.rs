// Rate limiting middleware using tower-governor
//
// Configuration:
// - Auth routes: 10 requests per second per client IP (burst of 20)
// - Every sign-up/sign-in call emails a passcode, so these are the abuse target
// - Client IP comes from X-Forwarded-For / X-Real-IP / Forwarded, then the
//   peer address (the server must be started with connect info)
//
// Applied in app.rs to the /api/auth routes only

use std::sync::Arc;

use axum::Router;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

/// Wrap `router` in the per-IP limiter
pub fn with_auth_rate_limit(router: Router) -> Router {
    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(100) // One token back every 100ms
            .burst_size(20) // Allow bursts up to 20
            .key_extractor(SmartIpKeyExtractor) // Key on the proxied client IP
            .use_headers() // Report x-ratelimit-* headers
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    router.layer(GovernorLayer { config })
}
