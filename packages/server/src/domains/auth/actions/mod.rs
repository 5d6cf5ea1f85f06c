//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP routes. Every
//! failure is logged here, once, before it is returned.

mod create_account;
mod current_user;
mod send_email_otp;
mod sign_in;
mod sign_out;
mod verify_secret;

pub use create_account::create_account;
pub use current_user::get_current_user;
pub use send_email_otp::send_email_otp;
pub use sign_in::sign_in_user;
pub use sign_out::sign_out_user;
pub use verify_secret::verify_secret;

use super::AuthError;

/// Reject blank input before it reaches the backend. The value itself is
/// passed through untouched.
fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidInput(format!("{field} is required")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_keeps_value_verbatim() {
        assert_eq!(require("email", " A@x.com").unwrap(), " A@x.com");
        assert!(matches!(
            require("email", "   "),
            Err(AuthError::InvalidInput(msg)) if msg == "email is required"
        ));
    }
}
