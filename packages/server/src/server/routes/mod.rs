// HTTP routes
pub mod auth;
pub mod health;
pub mod navigation;
pub mod users;

pub use auth::*;
pub use health::*;
pub use navigation::*;
pub use users::*;
