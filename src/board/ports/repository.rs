//! Repository port for board document persistence.

use crate::board::domain::{Board, BoardErrorKind, BoardId, BoardVersion, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
///
/// Writes replace the whole document. There is no partial update: a board is
/// loaded, mutated in memory, and written back in one call.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a newly created board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateBoard`] when the board ID
    /// already exists.
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Replaces an existing board document.
    ///
    /// `expected` is the version observed when the board was loaded. The write
    /// only succeeds while the stored document still carries that version.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the board does not
    /// exist or [`BoardRepositoryError::VersionConflict`] when another writer
    /// got there first.
    ///
    /// Adapters that write on a blocking thread keep writing when the caller
    /// stops waiting, so a caller that times out cannot tell whether the
    /// replacement landed.
    async fn update(&self, board: &Board, expected: BoardVersion) -> BoardRepositoryResult<()>;

    /// Finds a board by identifier.
    ///
    /// Returns `None` when the board does not exist.
    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Returns the boards owned by a user, oldest first.
    async fn find_by_owner(&self, owner: &UserId) -> BoardRepositoryResult<Vec<Board>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// The board was not found.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The stored document changed since it was loaded.
    #[error("board {id} was modified concurrently: expected {expected}, found {actual}")]
    VersionConflict {
        /// Board being written.
        id: BoardId,
        /// Version the writer loaded.
        expected: BoardVersion,
        /// Version currently stored.
        actual: BoardVersion,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the coarse error classification.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::NotFound(_) => BoardErrorKind::NotFound,
            Self::DuplicateBoard(_) | Self::VersionConflict { .. } => BoardErrorKind::Conflict,
            Self::Persistence(_) => BoardErrorKind::Storage,
        }
    }
}
