//! Service-level errors for board operations.

use crate::board::{
    domain::{BoardDomainError, BoardErrorKind, BoardId, UserId},
    ports::{BoardRepositoryError, UserDirectoryError},
};
use std::time::Duration;
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation or lookup failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The board identifier does not resolve.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The user directory does not know the user.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),

    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),

    /// A collaborator call exceeded the configured time budget.
    #[error("{operation} timed out after {} ms", timeout.as_millis())]
    Timeout {
        /// Operation that was cut short.
        operation: &'static str,
        /// Configured budget.
        timeout: Duration,
    },
}

impl BoardServiceError {
    /// Returns the coarse error classification.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::BoardNotFound(_) | Self::UnknownUser(_) => BoardErrorKind::NotFound,
            Self::Repository(err) => err.kind(),
            Self::Directory(_) => BoardErrorKind::Storage,
            Self::Timeout { .. } => BoardErrorKind::Timeout,
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
