//! Users domain - the directory of user records
//!
//! One record per email, written once when an account is provisioned.

pub mod models;

pub use models::{NewUser, UserRecord};
