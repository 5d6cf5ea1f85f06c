//! Sign out action

use tracing::{error, info};

use crate::common::{ResponseCookies, SESSION_COOKIE_NAME};
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Revoke the current session and drop the cookie.
///
/// The cookie is removed even when the backend call fails. Without a session
/// there is nothing to revoke, so that case succeeds.
pub async fn sign_out_user(
    session_secret: Option<&str>,
    cookies: &mut ResponseCookies,
    deps: &ServerDeps,
) -> Result<(), AuthError> {
    cookies.remove(SESSION_COOKIE_NAME, deps.cookie_secure);

    let Some(secret) = session_secret else {
        return Ok(());
    };

    deps.accounts
        .delete_current_session(secret)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to sign out user");
            AuthError::RemoteCallFailed(e)
        })?;

    info!("Session revoked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockAccountService, MockDocumentStore, TestDependencies};

    #[tokio::test]
    async fn test_revokes_session_and_clears_cookie() {
        let test_deps = TestDependencies::with_mocks(
            MockAccountService::new().with_session("live", "acc_1"),
            MockDocumentStore::new(),
        );
        let deps = test_deps.server_deps();

        let mut cookies = ResponseCookies::new();
        sign_out_user(Some("live"), &mut cookies, &deps).await.unwrap();

        assert!(!test_deps.accounts.has_session("live"));
        assert_eq!(cookies.get(SESSION_COOKIE_NAME).unwrap().max_age, Some(0));
    }

    #[tokio::test]
    async fn test_backend_failure_still_clears_cookie() {
        let test_deps = TestDependencies::with_mocks(
            MockAccountService::new()
                .with_session("live", "acc_1")
                .with_delete_failure("service unavailable"),
            MockDocumentStore::new(),
        );
        let deps = test_deps.server_deps();

        let mut cookies = ResponseCookies::new();
        let err = sign_out_user(Some("live"), &mut cookies, &deps)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::RemoteCallFailed(_)));
        assert_eq!(cookies.len(), 1);
    }

    #[tokio::test]
    async fn test_no_session_is_noop() {
        let test_deps = TestDependencies::new();
        let mut cookies = ResponseCookies::new();

        sign_out_user(None, &mut cookies, &test_deps.server_deps())
            .await
            .unwrap();
        assert_eq!(cookies.len(), 1);
    }
}
