//! Then steps for board workflow BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::board::domain::{BoardErrorKind, BoardVersion};

fn expect_failure(world: &BoardWorld, expected: BoardErrorKind) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    eyre::ensure!(
        err.kind() == expected,
        "expected {expected:?} failure, got {err:?}"
    );
    Ok(())
}

#[then(r#"column "{title}" holds the card"#)]
fn column_holds_card(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let card = world
        .card
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing card in scenario world"))?;
    let stored = world.reload()?;
    let column = stored.find_column(world.column(&title)?)?;
    eyre::ensure!(
        column.card(card.id()).is_some(),
        "card {} not found in column {title}",
        card.id()
    );
    Ok(())
}

#[then(r#"column "{title}" is empty"#)]
fn column_is_empty(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let stored = world.reload()?;
    let column = stored.find_column(world.column(&title)?)?;
    eyre::ensure!(
        column.cards().is_empty(),
        "column {title} still holds {} cards",
        column.cards().len()
    );
    Ok(())
}

#[then("the stored board is at version {version:u64}")]
fn stored_board_version(world: &BoardWorld, version: u64) -> Result<(), eyre::Report> {
    let stored = world.reload()?;
    eyre::ensure!(
        stored.version() == BoardVersion::new(version),
        "expected version {version}, found {}",
        stored.version()
    );
    Ok(())
}

#[then("the operation fails with a not found error")]
fn fails_with_not_found(world: &BoardWorld) -> Result<(), eyre::Report> {
    expect_failure(world, BoardErrorKind::NotFound)
}

#[then("the operation fails with a conflict error")]
fn fails_with_conflict(world: &BoardWorld) -> Result<(), eyre::Report> {
    expect_failure(world, BoardErrorKind::Conflict)
}

#[then("no board is stored")]
fn no_board_is_stored(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.repository.board_count()? == 0,
        "failed operation stored a board"
    );
    Ok(())
}
