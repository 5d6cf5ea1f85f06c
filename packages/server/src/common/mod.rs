// Common types and utilities shared across the application

pub mod cookies;

pub use cookies::{session_secret, Cookie, ResponseCookies, SameSite, SESSION_COOKIE_NAME};
