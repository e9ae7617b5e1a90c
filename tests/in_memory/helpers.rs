//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryBoardRepository, InMemoryUserDirectory},
    domain::{Board, ColumnId, UserId},
    ports::UserProfile,
    services::{BoardMutationService, BoardQueryService},
};

/// Mutation service type used across the in-memory tests.
pub type TestMutations =
    BoardMutationService<InMemoryBoardRepository, InMemoryUserDirectory, DefaultClock>;

/// Services sharing one in-memory repository.
pub struct Services {
    pub repository: Arc<InMemoryBoardRepository>,
    pub mutations: TestMutations,
    pub queries: BoardQueryService<InMemoryBoardRepository>,
}

/// Provides services over a fresh repository and a directory that knows
/// `alice`, `bob`, and `carol`.
#[fixture]
pub fn services() -> Services {
    let repository = Arc::new(InMemoryBoardRepository::new());
    let directory = InMemoryUserDirectory::with_profiles(
        ["alice", "bob", "carol"]
            .into_iter()
            .filter_map(|raw| UserId::new(raw).ok())
            .map(|user_id| UserProfile::new(user_id).with_display_name("Known user")),
    );

    Services {
        mutations: BoardMutationService::new(
            Arc::clone(&repository),
            Arc::new(directory),
            Arc::new(DefaultClock),
        ),
        queries: BoardQueryService::new(Arc::clone(&repository)),
        repository,
    }
}

/// Returns the identifier of the column with `title`.
///
/// # Errors
///
/// Returns an error when the board has no such column.
pub fn column_named(board: &Board, title: &str) -> Result<ColumnId, eyre::Report> {
    board
        .find_column_by_title(title)
        .map(|column| column.id())
        .ok_or_else(|| eyre::eyre!("board has no column titled {title}"))
}
