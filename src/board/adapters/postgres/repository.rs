//! `PostgreSQL` repository storing each board as one JSONB document.

use super::{
    models::{BoardDocument, BoardRow, NewBoardRow},
    schema::boards,
};
use crate::board::{
    domain::{Board, BoardId, BoardVersion, PersistedBoardData, UserId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const BOARDS_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_boards/up.sql");

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when the pool cannot open
/// its initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> BoardRepositoryResult<BoardPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(BoardRepositoryError::persistence)
}

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `boards` table and its index when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the schema cannot be
    /// applied.
    pub async fn ensure_schema(&self) -> BoardRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(BOARDS_SCHEMA_SQL)
                .map_err(BoardRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let new_row = to_new_row(board)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, board: &Board, expected: BoardVersion) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let row = to_new_row(board)?;
        let expected_value = to_db_version(expected)?;

        self.run_blocking(move |connection| {
            connection.transaction(move |tx| {
                let updated = diesel::update(
                    boards::table
                        .filter(boards::id.eq(board_id.into_inner()))
                        .filter(boards::version.eq(expected_value)),
                )
                .set((
                    boards::title.eq(row.title),
                    boards::document.eq(row.document),
                    boards::version.eq(row.version),
                    boards::updated_at.eq(row.updated_at),
                ))
                .execute(tx)
                .map_err(BoardRepositoryError::persistence)?;

                if updated == 1 {
                    return Ok(());
                }

                let actual = boards::table
                    .filter(boards::id.eq(board_id.into_inner()))
                    .select(boards::version)
                    .first::<i64>(tx)
                    .optional()
                    .map_err(BoardRepositoryError::persistence)?;
                match actual {
                    None => Err(BoardRepositoryError::NotFound(board_id)),
                    Some(actual) => Err(BoardRepositoryError::VersionConflict {
                        id: board_id,
                        expected,
                        actual: from_db_version(actual)?,
                    }),
                }
            })
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn find_by_owner(&self, owner: &UserId) -> BoardRepositoryResult<Vec<Board>> {
        let lookup_owner = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            boards::table
                .filter(boards::owner.eq(lookup_owner))
                .order((boards::created_at.asc(), boards::id.asc()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?
                .into_iter()
                .map(row_to_board)
                .collect()
        })
        .await
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn to_db_version(version: BoardVersion) -> BoardRepositoryResult<i64> {
    i64::try_from(version.value()).map_err(BoardRepositoryError::persistence)
}

fn from_db_version(value: i64) -> BoardRepositoryResult<BoardVersion> {
    u64::try_from(value)
        .map(BoardVersion::new)
        .map_err(BoardRepositoryError::persistence)
}

fn to_new_row(board: &Board) -> BoardRepositoryResult<NewBoardRow> {
    let document = BoardDocument {
        columns: board.columns().to_vec(),
        members: board.members().to_vec(),
    };
    let document = serde_json::to_value(document).map_err(BoardRepositoryError::persistence)?;

    Ok(NewBoardRow {
        id: board.id().into_inner(),
        title: board.title().to_owned(),
        owner: board.owner().as_str().to_owned(),
        document,
        version: to_db_version(board.version())?,
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    })
}

fn row_to_board(row: BoardRow) -> BoardRepositoryResult<Board> {
    let BoardRow {
        id,
        title,
        owner,
        document,
        version,
        created_at,
        updated_at,
    } = row;

    let BoardDocument { columns, members } =
        serde_json::from_value(document).map_err(BoardRepositoryError::persistence)?;
    let owner = UserId::new(owner).map_err(BoardRepositoryError::persistence)?;

    let data = PersistedBoardData {
        id: BoardId::from_uuid(id),
        title,
        owner,
        columns,
        members,
        version: from_db_version(version)?,
        created_at,
        updated_at,
    };
    Board::from_persisted(data).map_err(BoardRepositoryError::persistence)
}
