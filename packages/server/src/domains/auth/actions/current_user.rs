//! Current user action

use appwrite::AppwriteError;
use tracing::{debug, error};

use crate::domains::auth::AuthError;
use crate::domains::users::UserRecord;
use crate::kernel::ServerDeps;

/// Directory record of the user that owns `session_secret`.
///
/// Records are matched by account id first. A user who signed up again with
/// a known email holds a record under the earlier account id, so the account's
/// email is tried as a fallback.
pub async fn get_current_user(
    session_secret: Option<&str>,
    deps: &ServerDeps,
) -> Result<UserRecord, AuthError> {
    let secret = session_secret.ok_or(AuthError::Unauthenticated)?;

    let account = deps.accounts.get_account(secret).await.map_err(|e| {
        if is_rejection(&e) {
            debug!(error = %e, "Session rejected by backend");
            AuthError::Unauthenticated
        } else {
            error!(error = %e, "Failed to resolve session account");
            AuthError::RemoteCallFailed(e)
        }
    })?;

    let by_account = UserRecord::find_by_account_id(&account.id, deps)
        .await
        .map_err(|e| {
            error!(account_id = %account.id, error = %e, "Failed to look up current user");
            AuthError::RemoteCallFailed(e)
        })?;

    if let Some(user) = by_account {
        return Ok(user);
    }

    if account.email.is_empty() {
        return Err(AuthError::Unauthenticated);
    }

    UserRecord::find_by_email(&account.email, deps)
        .await
        .map_err(|e| {
            error!(account_id = %account.id, error = %e, "Failed to look up current user");
            AuthError::RemoteCallFailed(e)
        })?
        .ok_or(AuthError::Unauthenticated)
}

/// A 4xx means the backend refused the session. Anything else is an outage.
fn is_rejection(e: &anyhow::Error) -> bool {
    e.downcast_ref::<AppwriteError>()
        .and_then(AppwriteError::status)
        .is_some_and(|status| (400..500).contains(&status))
}
