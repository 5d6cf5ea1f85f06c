//! Send email OTP action

use appwrite::Id;
use tracing::{error, info, warn};

use super::require;
use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Ask the backend to mint a fresh account id and email a passcode for it.
///
/// Returns `None` when the backend answered without an account id; callers
/// decide whether that is fatal.
pub async fn send_email_otp(email: &str, deps: &ServerDeps) -> Result<Option<String>, AuthError> {
    let email = require("email", email)?;

    let token = deps
        .accounts
        .create_email_token(&Id::unique(), email)
        .await
        .map_err(|e| {
            error!(email = %email, error = %e, "Failed to send email OTP");
            AuthError::RemoteCallFailed(e)
        })?;

    if token.user_id.is_empty() {
        warn!(email = %email, "OTP token came back without an account id");
        return Ok(None);
    }

    info!(email = %email, account_id = %token.user_id, "Email OTP sent");
    Ok(Some(token.user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockAccountService, MockDocumentStore, TestDependencies};

    #[tokio::test]
    async fn test_returns_fresh_account_id() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();

        let first = send_email_otp("a@x.com", &deps).await.unwrap().unwrap();
        let second = send_email_otp("a@x.com", &deps).await.unwrap().unwrap();

        assert_ne!(first, second);
        let calls = test_deps.accounts.token_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].email, "a@x.com");
        assert_eq!(calls[0].user_id, first);
    }

    #[tokio::test]
    async fn test_missing_account_id_is_none() {
        let test_deps = TestDependencies::with_mocks(
            MockAccountService::new().with_account_ids(&[""]),
            MockDocumentStore::new(),
        );
        let deps = test_deps.server_deps();

        assert_eq!(send_email_otp("a@x.com", &deps).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_backend_failure_is_remote_error() {
        let test_deps = TestDependencies::with_mocks(
            MockAccountService::new().with_token_failure("rate limit exceeded"),
            MockDocumentStore::new(),
        );
        let deps = test_deps.server_deps();

        let err = send_email_otp("a@x.com", &deps).await.unwrap_err();
        assert!(matches!(err, AuthError::RemoteCallFailed(ref e) if e.to_string() == "rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_blank_email_never_reaches_backend() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();

        let err = send_email_otp("  ", &deps).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
        assert!(test_deps.accounts.token_calls().is_empty());
    }
}
