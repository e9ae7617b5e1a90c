//! Direct tests of the in-memory board repository contract.

use mockable::DefaultClock;
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, BoardDraft, BoardId, BoardVersion, UserId},
    ports::{BoardRepository, BoardRepositoryError},
};

fn new_board(owner: &str, title: &str) -> Result<Board, eyre::Report> {
    let owner = UserId::new(owner)?;
    Ok(Board::create(BoardDraft::new(title, owner), &DefaultClock)?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifiers() -> Result<(), eyre::Report> {
    let repository = InMemoryBoardRepository::new();
    let board = new_board("alice", "Sprint 1")?;

    repository.store(&board).await?;
    let duplicate = repository.store(&board).await;

    eyre::ensure!(
        matches!(duplicate, Err(BoardRepositoryError::DuplicateBoard(id)) if id == board.id()),
        "expected duplicate board error, got {duplicate:?}"
    );
    eyre::ensure!(repository.board_count()? == 1, "board stored twice");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_document_when_version_matches() -> Result<(), eyre::Report> {
    let repository = InMemoryBoardRepository::new();
    let mut board = new_board("alice", "Sprint 1")?;
    repository.store(&board).await?;

    board.add_column("QA", &DefaultClock)?;
    repository.update(&board, BoardVersion::INITIAL).await?;

    let stored = repository
        .find_by_id(board.id())
        .await?
        .ok_or_else(|| eyre::eyre!("board missing after update"))?;
    eyre::ensure!(stored == board, "stored document differs from update");
    eyre::ensure!(stored.version() == BoardVersion::new(2), "version not advanced");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_board_is_not_found() -> Result<(), eyre::Report> {
    let repository = InMemoryBoardRepository::new();
    let board = new_board("alice", "Sprint 1")?;

    let result = repository.update(&board, board.version()).await;

    eyre::ensure!(
        matches!(result, Err(BoardRepositoryError::NotFound(id)) if id == board.id()),
        "expected not found, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookups_miss_cleanly() -> Result<(), eyre::Report> {
    let repository = InMemoryBoardRepository::new();
    repository.store(&new_board("alice", "Sprint 1")?).await?;

    eyre::ensure!(
        repository.find_by_id(BoardId::new()).await?.is_none(),
        "unexpected board for random id"
    );
    eyre::ensure!(
        repository
            .find_by_owner(&UserId::new("bob")?)
            .await?
            .is_empty(),
        "bob should own no boards"
    );
    Ok(())
}
