//! Time-bounded access to the board repository shared by the services.

use super::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{Board, BoardErrorKind, BoardId, BoardVersion, UserId},
    ports::{BoardRepository, BoardRepositoryError},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default budget for a single collaborator call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables shared by the board services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardServiceConfig {
    /// Upper bound for each repository or user directory call.
    pub store_timeout: Duration,
}

impl BoardServiceConfig {
    /// Creates a configuration with the given call timeout.
    #[must_use]
    pub const fn new(store_timeout: Duration) -> Self {
        Self { store_timeout }
    }
}

impl Default for BoardServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_TIMEOUT)
    }
}

/// Awaits `future`, failing with [`BoardServiceError::Timeout`] once the
/// budget is spent.
///
/// Dropping the future does not cancel work an adapter already handed to a
/// blocking thread, so a timed-out write may still commit later.
pub(super) async fn bounded<T, E>(
    operation: &'static str,
    timeout: Duration,
    future: impl Future<Output = Result<T, E>>,
) -> BoardServiceResult<T>
where
    BoardServiceError: From<E>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result.map_err(BoardServiceError::from),
        Err(_) => {
            tracing::warn!(operation, ?timeout, "collaborator call timed out");
            Err(BoardServiceError::Timeout { operation, timeout })
        }
    }
}

/// Repository wrapper that bounds every call and logs storage failures.
pub(super) struct BoardStore<R>
where
    R: BoardRepository + ?Sized,
{
    repository: Arc<R>,
    timeout: Duration,
}

impl<R> Clone for BoardStore<R>
where
    R: BoardRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            timeout: self.timeout,
        }
    }
}

impl<R> BoardStore<R>
where
    R: BoardRepository + ?Sized,
{
    pub(super) const fn new(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    pub(super) const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(super) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(super) async fn load(&self, id: BoardId) -> BoardServiceResult<Board> {
        let found = bounded(
            "load board",
            self.timeout,
            observe(self.repository.find_by_id(id)),
        )
        .await?;
        found.ok_or(BoardServiceError::BoardNotFound(id))
    }

    pub(super) async fn insert(&self, board: &Board) -> BoardServiceResult<()> {
        bounded(
            "store board",
            self.timeout,
            observe(self.repository.store(board)),
        )
        .await
    }

    pub(super) async fn replace(
        &self,
        board: &Board,
        expected: BoardVersion,
    ) -> BoardServiceResult<()> {
        bounded(
            "update board",
            self.timeout,
            observe(self.repository.update(board, expected)),
        )
        .await
    }

    pub(super) async fn owned_by(&self, owner: &UserId) -> BoardServiceResult<Vec<Board>> {
        bounded(
            "list boards by owner",
            self.timeout,
            observe(self.repository.find_by_owner(owner)),
        )
        .await
    }
}

/// Logs repository failures at a level matching their kind.
async fn observe<T>(
    future: impl Future<Output = Result<T, BoardRepositoryError>>,
) -> Result<T, BoardRepositoryError> {
    let result = future.await;
    if let Err(err) = &result {
        match err.kind() {
            BoardErrorKind::Storage => tracing::error!(error = %err, "board repository failure"),
            BoardErrorKind::Conflict => tracing::warn!(error = %err, "board write rejected"),
            _ => tracing::debug!(error = %err, "board repository miss"),
        }
    }
    result
}
