//! Board repository behaviour against a real `PostgreSQL` database.

use crate::postgres::helpers::{BoardDatabase, cluster, new_board};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::rstest;
use taskboard::board::{
    domain::{Board, BoardId, BoardVersion, Column, UserId},
    ports::{BoardRepository, BoardRepositoryError},
};

fn first_column(board: &Board) -> eyre::Result<Column> {
    board
        .columns()
        .first()
        .cloned()
        .ok_or_else(|| eyre::eyre!("board has no columns"))
}

#[rstest]
fn stored_board_round_trips_through_jsonb(
    cluster: Option<&'static TestCluster>,
) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_round_trip")?;
    let mut board = new_board("alice", "Sprint 1")?;
    let backlog = first_column(&board)?.id();
    let card = board.add_card(backlog, "Persist me", Some("JSONB".to_owned()), &DefaultClock)?;
    board.add_comment(
        backlog,
        card.id(),
        board.owner().clone(),
        "stored as a document",
        &DefaultClock,
    )?;

    db.rt.block_on(db.repository.store(&board))?;
    let fetched = db
        .rt
        .block_on(db.repository.find_by_id(board.id()))?
        .ok_or_else(|| eyre::eyre!("stored board not found"))?;
    let missing = db.rt.block_on(db.repository.find_by_id(BoardId::new()))?;

    eyre::ensure!(fetched.version() == BoardVersion::new(3), "version {}", fetched.version());
    eyre::ensure!(fetched.columns() == board.columns(), "columns changed in storage");
    eyre::ensure!(fetched.members() == board.members(), "members changed in storage");
    eyre::ensure!(
        fetched.created_at().timestamp_micros() == board.created_at().timestamp_micros(),
        "created_at drifted"
    );
    eyre::ensure!(missing.is_none(), "unknown id returned a board");
    Ok(())
}

#[rstest]
fn storing_an_existing_id_is_a_duplicate(
    cluster: Option<&'static TestCluster>,
) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_duplicate")?;
    let board = new_board("alice", "Sprint 1")?;

    db.rt.block_on(db.repository.store(&board))?;
    let duplicate = db.rt.block_on(db.repository.store(&board));

    eyre::ensure!(
        matches!(duplicate, Err(BoardRepositoryError::DuplicateBoard(id)) if id == board.id()),
        "expected duplicate board error, got {duplicate:?}"
    );
    Ok(())
}

#[rstest]
fn update_with_observed_version_replaces_document(
    cluster: Option<&'static TestCluster>,
) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_update")?;
    let mut board = new_board("alice", "Sprint 1")?;
    db.rt.block_on(db.repository.store(&board))?;

    board.add_column("QA", &DefaultClock)?;
    db.rt
        .block_on(db.repository.update(&board, BoardVersion::INITIAL))?;

    let stored = db
        .rt
        .block_on(db.repository.find_by_id(board.id()))?
        .ok_or_else(|| eyre::eyre!("board missing after update"))?;
    eyre::ensure!(stored.version() == BoardVersion::new(2), "version not advanced");
    eyre::ensure!(stored.columns().len() == 4, "new column not stored");
    Ok(())
}

#[rstest]
fn stale_update_is_a_version_conflict(
    cluster: Option<&'static TestCluster>,
) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_stale")?;
    let original = new_board("alice", "Sprint 1")?;
    db.rt.block_on(db.repository.store(&original))?;

    let mut first = original.clone();
    first.add_column("QA", &DefaultClock)?;
    db.rt
        .block_on(db.repository.update(&first, BoardVersion::INITIAL))?;

    let mut second = original.clone();
    second.add_column("Ops", &DefaultClock)?;
    let stale = db
        .rt
        .block_on(db.repository.update(&second, BoardVersion::INITIAL));

    eyre::ensure!(
        matches!(
            stale,
            Err(BoardRepositoryError::VersionConflict { id, expected, actual })
                if id == original.id()
                    && expected == BoardVersion::INITIAL
                    && actual == BoardVersion::new(2)
        ),
        "expected version conflict, got {stale:?}"
    );
    let stored = db
        .rt
        .block_on(db.repository.find_by_id(original.id()))?
        .ok_or_else(|| eyre::eyre!("board missing after conflict"))?;
    eyre::ensure!(stored.columns() == first.columns(), "stale write was applied");
    Ok(())
}

#[rstest]
fn update_of_unknown_board_is_not_found(
    cluster: Option<&'static TestCluster>,
) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_missing")?;
    let board = new_board("alice", "Never stored")?;

    let result = db
        .rt
        .block_on(db.repository.update(&board, BoardVersion::INITIAL));

    eyre::ensure!(
        matches!(result, Err(BoardRepositoryError::NotFound(id)) if id == board.id()),
        "expected not found, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn owner_listing_follows_creation_order(
    cluster: Option<&'static TestCluster>,
) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_owner")?;
    let owned = ["Sprint 1", "Sprint 2", "Sprint 3"]
        .into_iter()
        .map(|title| new_board("alice", title))
        .collect::<eyre::Result<Vec<_>>>()?;
    let other = new_board("bob", "Elsewhere")?;

    for board in owned.iter().rev().chain([&other]) {
        db.rt.block_on(db.repository.store(board))?;
    }
    let alice = UserId::new("alice")?;
    let listed = db.rt.block_on(db.repository.find_by_owner(&alice))?;
    let nobody = UserId::new("nobody")?;
    let empty = db.rt.block_on(db.repository.find_by_owner(&nobody))?;

    let mut expected: Vec<_> = owned
        .iter()
        .map(|board| (board.created_at().timestamp_micros(), board.id()))
        .collect();
    expected.sort();
    let listed_ids: Vec<BoardId> = listed.iter().map(Board::id).collect();
    let expected_ids: Vec<BoardId> = expected.into_iter().map(|(_, id)| id).collect();
    eyre::ensure!(listed_ids == expected_ids, "unexpected order {listed_ids:?}");
    eyre::ensure!(empty.is_empty(), "unknown owner listed boards");
    Ok(())
}

#[rstest]
fn schema_setup_is_idempotent(cluster: Option<&'static TestCluster>) -> eyre::Result<()> {
    let Some(cluster) = cluster else {
        return Ok(());
    };
    let db = BoardDatabase::create(cluster, "board_schema")?;

    db.rt.block_on(db.repository.ensure_schema())?;
    db.rt
        .block_on(db.repository.store(&new_board("alice", "After setup")?))?;
    Ok(())
}
