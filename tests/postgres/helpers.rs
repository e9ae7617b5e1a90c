//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Each test gets its own database cloned from a template that already has
//! the migrations applied. When the embedded cluster cannot be started on
//! this machine the fixture yields `None` and the tests return early.

#![expect(
    clippy::print_stderr,
    reason = "Skip and cleanup warnings are informational"
)]

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_cluster;
use rstest::fixture;
use taskboard::board::{
    adapters::postgres::PostgresBoardRepository,
    domain::{Board, BoardDraft, UserId},
};
use tokio::runtime::Runtime;

/// SQL creating the `boards` table.
pub const CREATE_BOARDS_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_boards/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Shared embedded cluster, or `None` when it cannot run here.
#[fixture]
pub fn cluster() -> Option<&'static TestCluster> {
    match shared_cluster() {
        Ok(cluster) => Some(cluster),
        Err(err) => {
            eprintln!("skipping PostgreSQL tests: embedded cluster unavailable: {err}");
            None
        }
    }
}

/// Creates a tokio runtime for driving the async repository from sync tests.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error when template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            execute_sql_statements(&mut conn, CREATE_BOARDS_SQL)?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Executes each `;`-separated statement of `sql` in turn.
fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() || trimmed.lines().all(|line| line.trim().starts_with("--")) {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|e| eyre::eyre!("SQL error: {e}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// Drops a test database when it goes out of scope.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// A migrated database owned by one test.
///
/// Fields drop in order, so the pool closes its connections before the
/// guard drops the database.
pub struct BoardDatabase {
    /// Repository connected to the database.
    pub repository: PostgresBoardRepository,
    /// Runtime driving the repository.
    pub rt: Runtime,
    _guard: CleanupGuard,
}

impl BoardDatabase {
    /// Clones the template into a fresh database and connects a repository.
    ///
    /// # Errors
    ///
    /// Returns an error when the database or its pool cannot be created.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("database creation failed: {e}"))?;
        let guard = CleanupGuard {
            cluster,
            db_name: db_name.clone(),
        };
        let manager = ConnectionManager::<PgConnection>::new(
            cluster.connection().database_url(&db_name),
        );
        let pool = Pool::builder().max_size(2).build(manager)?;
        Ok(Self {
            repository: PostgresBoardRepository::new(pool),
            rt: test_runtime()?,
            _guard: guard,
        })
    }
}

/// Builds an unsaved board with the default layout.
///
/// # Errors
///
/// Returns an error when the owner or title is invalid.
pub fn new_board(owner: &str, title: &str) -> eyre::Result<Board> {
    let owner = UserId::new(owner)?;
    Ok(Board::create(BoardDraft::new(title, owner), &DefaultClock)?)
}
