//! Verify secret action

use tracing::{error, info};

use super::require;
use crate::common::{Cookie, ResponseCookies};
use crate::domains::auth::{AuthError, SessionVerified};
use crate::kernel::ServerDeps;

/// Exchange an account id and passcode for a session and set the session
/// cookie. No cookie is written unless the exchange succeeds.
pub async fn verify_secret(
    account_id: &str,
    password: &str,
    cookies: &mut ResponseCookies,
    deps: &ServerDeps,
) -> Result<SessionVerified, AuthError> {
    let account_id = require("accountId", account_id)?;
    let password = require("password", password)?;

    let session = deps
        .accounts
        .create_session(account_id, password)
        .await
        .map_err(|e| {
            error!(account_id = %account_id, error = %e, "Failed to verify secret");
            AuthError::RemoteCallFailed(e)
        })?;

    if session.secret.is_empty() {
        error!(
            account_id = %account_id,
            session_id = %session.id,
            "Session created without a secret"
        );
        return Err(AuthError::InvariantViolated(
            "session has no secret".to_string(),
        ));
    }

    cookies.set(Cookie::session(&session.secret, deps.cookie_secure));

    info!(account_id = %account_id, session_id = %session.id, "Session established");
    Ok(SessionVerified {
        session_id: session.id,
    })
}
