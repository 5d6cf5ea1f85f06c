//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{AppwriteAdapter, DirectoryConfig, ServerDeps};
pub use test_dependencies::{MockAccountService, MockDocumentStore, TestDependencies};
pub use traits::*;
