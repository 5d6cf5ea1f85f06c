//! Auth domain - account provisioning and session establishment
//!
//! Responsibilities:
//! - Email OTP issuance via the backend account API
//! - Directory record creation on first sign-up
//! - Exchanging (accountId, passcode) for a session cookie

pub mod actions;
pub mod errors;
pub mod types;

pub use actions::{
    create_account, get_current_user, send_email_otp, sign_in_user, sign_out_user, verify_secret,
};
pub use errors::AuthError;
pub use types::{OtpIssued, SessionVerified};
