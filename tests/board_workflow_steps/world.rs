//! Shared world state for board workflow BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryBoardRepository, InMemoryUserDirectory},
    domain::{Board, Card, ColumnId, UserId},
    ports::UserProfile,
    services::{BoardMutationService, BoardQueryService, BoardServiceError},
};

/// Mutation service type used by the BDD world.
pub type TestMutations =
    BoardMutationService<InMemoryBoardRepository, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for board workflow behaviour tests.
pub struct BoardWorld {
    pub repository: Arc<InMemoryBoardRepository>,
    pub mutations: TestMutations,
    pub queries: BoardQueryService<InMemoryBoardRepository>,
    pub board: Option<Board>,
    pub card: Option<Card>,
    pub last_error: Option<BoardServiceError>,
}

impl BoardWorld {
    /// Creates a world whose user directory knows `alice` and `bob`.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryBoardRepository::new());
        let directory = InMemoryUserDirectory::with_profiles(
            ["alice", "bob"]
                .into_iter()
                .filter_map(|raw| UserId::new(raw).ok())
                .map(UserProfile::new),
        );

        Self {
            mutations: BoardMutationService::new(
                Arc::clone(&repository),
                Arc::new(directory),
                Arc::new(DefaultClock),
            ),
            queries: BoardQueryService::new(Arc::clone(&repository)),
            repository,
            board: None,
            card: None,
            last_error: None,
        }
    }

    /// Returns the board created by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been created yet.
    pub fn board(&self) -> Result<&Board, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Reloads the current board from storage.
    ///
    /// # Errors
    ///
    /// Returns an error when no board exists or the lookup fails.
    pub fn reload(&self) -> Result<Board, eyre::Report> {
        let board_id = self.board()?.id();
        Ok(run_async(self.queries.get_board(board_id))?)
    }

    /// Resolves a column of the current board by title.
    ///
    /// # Errors
    ///
    /// Returns an error when the board or column is missing.
    pub fn column(&self, title: &str) -> Result<ColumnId, eyre::Report> {
        self.board()?
            .find_column_by_title(title)
            .map(|column| column.id())
            .ok_or_else(|| eyre::eyre!("board has no column titled {title}"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
