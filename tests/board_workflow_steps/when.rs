//! When steps for board workflow BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::BoardId;

#[when(r#"the card is moved from "{from}" to "{to}""#)]
fn card_is_moved(world: &mut BoardWorld, from: String, to: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let card_id = world
        .card
        .as_ref()
        .map(|card| card.id())
        .ok_or_else(|| eyre::eyre!("missing card in scenario world"))?;
    let from_column = world.column(&from)?;
    let to_column = world.column(&to)?;

    match run_async(
        world
            .mutations
            .move_card(board_id, from_column, to_column, card_id),
    ) {
        Ok(card) => world.card = Some(card),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#"a column "{title}" is added to a board that does not exist"#)]
fn column_added_to_missing_board(world: &mut BoardWorld, title: String) {
    if let Err(err) = run_async(world.mutations.add_column(BoardId::new(), title)) {
        world.last_error = Some(err);
    }
}

#[when(r#""{user}" is added to the board again"#)]
fn user_added_again(world: &mut BoardWorld, user: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    if let Err(err) = run_async(world.mutations.add_member(board_id, &user)) {
        world.last_error = Some(err);
    }
    Ok(())
}
