//! Create account action

use tracing::{debug, error, info};

use super::{require, send_email_otp};
use crate::domains::auth::{AuthError, OtpIssued};
use crate::domains::users::{NewUser, UserRecord};
use crate::kernel::ServerDeps;

/// Start sign-up for `email`.
///
/// 1. Look up an existing directory record
/// 2. Issue an OTP (always, even for known emails)
/// 3. Fail if the backend gave no account id
/// 4. Create the directory record if none existed
/// 5. Return the account id the passcode is bound to
///
/// The lookup and the write are not atomic; two concurrent sign-ups for the
/// same email can both create a record unless the collection has a unique
/// index on `email`.
pub async fn create_account(
    full_name: &str,
    email: &str,
    deps: &ServerDeps,
) -> Result<OtpIssued, AuthError> {
    let full_name = require("fullName", full_name)?;
    let email = require("email", email)?;

    let existing = UserRecord::find_by_email(email, deps).await.map_err(|e| {
        error!(email = %email, error = %e, "Failed to look up user");
        AuthError::RemoteCallFailed(e)
    })?;

    let Some(account_id) = send_email_otp(email, deps).await? else {
        error!(email = %email, "Failed to create account: no account id issued");
        return Err(AuthError::ProvisioningFailed);
    };

    match existing {
        Some(user) => {
            debug!(
                email = %email,
                user_id = %user.id,
                "User record already exists, skipping creation"
            );
        }
        None => {
            let new_user = NewUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                avatar: deps.avatar_placeholder_url.clone(),
                account_id: account_id.clone(),
            };

            let user = UserRecord::create(new_user, deps).await.map_err(|e| {
                error!(
                    email = %email,
                    account_id = %account_id,
                    error = %e,
                    "Failed to create user"
                );
                AuthError::DirectoryWriteFailed {
                    account_id: account_id.clone(),
                    source: e,
                }
            })?;

            info!(email = %email, user_id = %user.id, "User record created");
        }
    }

    Ok(OtpIssued { account_id })
}
