//! In-memory board repository for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Board, BoardId, BoardVersion, UserId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Board>,
    owner_index: HashMap<UserId, Vec<BoardId>>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored boards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn board_count(&self) -> BoardRepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.boards.len())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardRepositoryError::DuplicateBoard(board.id()));
        }

        state
            .owner_index
            .entry(board.owner().clone())
            .or_default()
            .push(board.id());
        state.boards.insert(board.id(), board.clone());
        Ok(())
    }

    async fn update(&self, board: &Board, expected: BoardVersion) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .boards
            .get(&board.id())
            .ok_or(BoardRepositoryError::NotFound(board.id()))?;

        if stored.version() != expected {
            return Err(BoardRepositoryError::VersionConflict {
                id: board.id(),
                expected,
                actual: stored.version(),
            });
        }

        state.boards.insert(board.id(), board.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.boards.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: &UserId) -> BoardRepositoryResult<Vec<Board>> {
        let state = self.state.read().map_err(poisoned)?;
        let boards = state
            .owner_index
            .get(owner)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.boards.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(boards)
    }
}
