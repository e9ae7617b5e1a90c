//! Read-only board lookups.

use super::{
    BoardServiceConfig, BoardServiceResult,
    store::BoardStore,
};
use crate::board::{
    domain::{Board, BoardId, Member, UserId},
    ports::BoardRepository,
};
use std::sync::Arc;

/// Board query service.
pub struct BoardQueryService<R>
where
    R: BoardRepository + ?Sized,
{
    store: BoardStore<R>,
}

impl<R> Clone for BoardQueryService<R>
where
    R: BoardRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<R> BoardQueryService<R>
where
    R: BoardRepository + ?Sized,
{
    /// Creates a new query service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            store: BoardStore::new(repository, BoardServiceConfig::default().store_timeout),
        }
    }

    /// Applies service configuration.
    #[must_use]
    pub fn with_config(mut self, config: BoardServiceConfig) -> Self {
        self.store = self.store.with_timeout(config.store_timeout);
        self
    }

    /// Loads a full board.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::BoardNotFound`] when the board does
    /// not exist, or a storage or timeout error from the repository.
    #[tracing::instrument(skip_all, fields(board_id = %board_id))]
    pub async fn get_board(&self, board_id: BoardId) -> BoardServiceResult<Board> {
        self.store.load(board_id).await
    }

    /// Lists the boards owned by a user, oldest first.
    ///
    /// An owner without boards yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Domain`] for a malformed user
    /// identifier, or a storage or timeout error from the repository.
    #[tracing::instrument(skip_all, fields(owner = owner))]
    pub async fn list_boards_by_owner(&self, owner: &str) -> BoardServiceResult<Vec<Board>> {
        let owner = UserId::new(owner)?;
        let boards = self.store.owned_by(&owner).await?;
        tracing::debug!(count = boards.len(), "boards listed");
        Ok(boards)
    }

    /// Lists board members, owner first.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::BoardNotFound`] when the board does
    /// not exist.
    pub async fn list_members(&self, board_id: BoardId) -> BoardServiceResult<Vec<Member>> {
        let board = self.store.load(board_id).await?;
        Ok(board.members().to_vec())
    }

    /// Looks up a single member.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board or the member is absent.
    pub async fn get_member(&self, board_id: BoardId, user_id: &str) -> BoardServiceResult<Member> {
        let user_id = UserId::new(user_id)?;
        let board = self.store.load(board_id).await?;
        Ok(board.find_member(&user_id)?.clone())
    }
}
