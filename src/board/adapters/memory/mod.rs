//! In-memory adapters for board persistence and user lookups.

mod board;
mod user_directory;

pub use board::InMemoryBoardRepository;
pub use user_directory::InMemoryUserDirectory;
