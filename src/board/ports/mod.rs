//! Port contracts for the board aggregate.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;
pub mod user_directory;

pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
pub use user_directory::{UserDirectory, UserDirectoryError, UserDirectoryResult, UserProfile};
