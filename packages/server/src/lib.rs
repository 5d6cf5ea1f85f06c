// File storage app - API core
//
// Account provisioning (email OTP) and session establishment on top of an
// Appwrite project. Workflows live in domains/, backend access goes through
// the kernel traits so tests can substitute in-memory mocks.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
