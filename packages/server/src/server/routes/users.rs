use axum::{extract::Extension, http::HeaderMap, Json};

use crate::common::session_secret;
use crate::domains::auth::{get_current_user, AuthError};
use crate::domains::users::UserRecord;
use crate::server::app::AppState;

/// Directory record of the signed-in user
pub async fn current_user_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserRecord>, AuthError> {
    let user = get_current_user(session_secret(&headers), &state.deps).await?;
    Ok(Json(user))
}
