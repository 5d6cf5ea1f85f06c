use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::common::session_secret;
use crate::domains::auth::{get_current_user, AuthError};
use crate::domains::navigation::{sidebar, Sidebar};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigationParams {
    /// Current route; defaults to the dashboard
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

/// Sidebar entries for the signed-in user with the current route highlighted
pub async fn navigation_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<NavigationParams>,
    headers: HeaderMap,
) -> Result<Json<Sidebar>, AuthError> {
    let user = get_current_user(session_secret(&headers), &state.deps).await?;
    Ok(Json(sidebar(&user, &params.path)))
}
