//! Auth endpoints: sign-up, sign-in, passcode verification, sign-out.

use axum::{extract::Extension, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;

use crate::common::{session_secret, ResponseCookies};
use crate::domains::auth::{
    create_account, sign_in_user, sign_out_user, verify_secret, AuthError, OtpIssued,
    SessionVerified,
};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub account_id: String,
    pub password: String,
}

pub async fn sign_up_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<OtpIssued>, AuthError> {
    let issued = create_account(&request.full_name, &request.email, &state.deps).await?;
    Ok(Json(issued))
}

pub async fn sign_in_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<OtpIssued>, AuthError> {
    let issued = sign_in_user(&request.email, &state.deps).await?;
    Ok(Json(issued))
}

/// Sets the session cookie on success
pub async fn verify_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<(ResponseCookies, Json<SessionVerified>), AuthError> {
    let mut cookies = ResponseCookies::new();
    let verified = verify_secret(
        &request.account_id,
        &request.password,
        &mut cookies,
        &state.deps,
    )
    .await?;

    Ok((cookies, Json(verified)))
}

/// Always clears the cookie, even if revoking the session fails
pub async fn sign_out_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> (ResponseCookies, Result<StatusCode, AuthError>) {
    let mut cookies = ResponseCookies::new();
    let result = sign_out_user(session_secret(&headers), &mut cookies, &state.deps)
        .await
        .map(|_| StatusCode::NO_CONTENT);

    (cookies, result)
}
