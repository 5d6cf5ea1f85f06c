//! Auth domain data types
//!
//! Simple, serializable types returned by auth actions.

use serde::{Deserialize, Serialize};

/// An OTP is on its way; `account_id` must be sent back with the passcode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpIssued {
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionVerified {
    pub session_id: String,
}
