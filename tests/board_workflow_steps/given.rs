//! Given steps for board workflow BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::services::{AddCardRequest, CreateBoardRequest};

#[given(r#"a board "{title}" owned by "{owner}""#)]
fn board_owned_by(world: &mut BoardWorld, title: String, owner: String) -> Result<(), eyre::Report> {
    let board = run_async(
        world
            .mutations
            .create_board(CreateBoardRequest::new(title, owner)),
    )
    .wrap_err("create board for scenario")?;
    world.board = Some(board);
    Ok(())
}

#[given(r#"a card "{title}" in column "{column}""#)]
fn card_in_column(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let column_id = world.column(&column)?;
    let card = run_async(
        world
            .mutations
            .add_card(board_id, column_id, AddCardRequest::new(title)),
    )
    .wrap_err("add card for scenario")?;
    world.card = Some(card);
    Ok(())
}

#[given(r#""{user}" has joined the board"#)]
fn user_has_joined(world: &mut BoardWorld, user: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    run_async(world.mutations.add_member(board_id, &user)).wrap_err("add member for scenario")?;
    Ok(())
}

#[given("an empty board store")]
fn empty_board_store(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.repository.board_count()? == 0,
        "scenario store should start empty"
    );
    Ok(())
}
