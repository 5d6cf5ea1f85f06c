use thiserror::Error;

/// Failures of the auth workflows
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    /// OTP issuance returned no account id to correlate the passcode with
    #[error("Failed to create account")]
    ProvisioningFailed,

    /// The OTP went out but the directory record could not be written
    #[error("Failed to create user record for account {account_id}")]
    DirectoryWriteFailed {
        account_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("User not found")]
    UserNotFound,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Backend returned an inconsistent response: {0}")]
    InvariantViolated(String),

    #[error("Backend call failed: {0}")]
    RemoteCallFailed(#[from] anyhow::Error),
}
