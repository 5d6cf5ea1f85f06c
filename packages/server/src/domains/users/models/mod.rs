pub mod user;

pub use user::{NewUser, UserRecord};
