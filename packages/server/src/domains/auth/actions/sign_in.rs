//! Sign in action

use tracing::{error, info};

use super::{require, send_email_otp};
use crate::domains::auth::{AuthError, OtpIssued};
use crate::domains::users::UserRecord;
use crate::kernel::ServerDeps;

/// Send a passcode to a known user. Unknown emails get `UserNotFound` and no
/// OTP is issued.
pub async fn sign_in_user(email: &str, deps: &ServerDeps) -> Result<OtpIssued, AuthError> {
    let email = require("email", email)?;

    let existing = UserRecord::find_by_email(email, deps).await.map_err(|e| {
        error!(email = %email, error = %e, "Failed to look up user");
        AuthError::RemoteCallFailed(e)
    })?;

    if existing.is_none() {
        info!(email = %email, "Sign-in attempted for unknown email");
        return Err(AuthError::UserNotFound);
    }

    let Some(account_id) = send_email_otp(email, deps).await? else {
        error!(email = %email, "Failed to sign in: no account id issued");
        return Err(AuthError::ProvisioningFailed);
    };

    Ok(OtpIssued { account_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::create_account;
    use crate::kernel::TestDependencies;

    #[tokio::test]
    async fn test_known_user_gets_otp() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();
        create_account("A B", "a@x.com", &deps).await.unwrap();

        let issued = sign_in_user("a@x.com", &deps).await.unwrap();
        assert!(!issued.account_id.is_empty());
        assert_eq!(test_deps.accounts.token_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_gets_nothing() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();

        let err = sign_in_user("ghost@x.com", &deps).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert!(test_deps.accounts.token_calls().is_empty());
    }
}
