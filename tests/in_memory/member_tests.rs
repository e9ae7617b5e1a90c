//! Membership management against the in-memory user directory.

use super::helpers::{Services, services};
use rstest::rstest;
use taskboard::board::{
    domain::{BoardDomainError, BoardId},
    services::{BoardServiceError, CreateBoardRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn known_user_joins_with_profile(services: Services) -> Result<(), eyre::Report> {
    let board = services
        .mutations
        .create_board(CreateBoardRequest::new("Sprint 1", "alice"))
        .await?;

    let added = services.mutations.add_member(board.id(), "bob").await?;
    let members = services.queries.list_members(board.id()).await?;

    eyre::ensure!(added.display_name() == Some("Known user"), "profile not cached");
    eyre::ensure!(members.len() == 2, "expected owner plus bob");
    eyre::ensure!(
        members.first().map(|member| member.user_id().as_str()) == Some("alice"),
        "owner must stay first"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn membership_errors_are_classified(services: Services) -> Result<(), eyre::Report> {
    let board = services
        .mutations
        .create_board(CreateBoardRequest::new("Sprint 1", "alice"))
        .await?;
    services.mutations.add_member(board.id(), "bob").await?;

    let twice = services.mutations.add_member(board.id(), "bob").await;
    let stranger = services.mutations.add_member(board.id(), "mallory").await;
    let no_board = services.mutations.add_member(BoardId::new(), "bob").await;
    let missing_member = services.queries.get_member(board.id(), "carol").await;

    eyre::ensure!(
        matches!(twice, Err(BoardServiceError::Domain(BoardDomainError::DuplicateMember(_)))),
        "duplicate member accepted: {twice:?}"
    );
    eyre::ensure!(
        matches!(stranger, Err(BoardServiceError::UnknownUser(_))),
        "unknown user accepted: {stranger:?}"
    );
    eyre::ensure!(
        matches!(no_board, Err(BoardServiceError::BoardNotFound(_))),
        "missing board not reported: {no_board:?}"
    );
    eyre::ensure!(
        matches!(
            missing_member,
            Err(BoardServiceError::Domain(BoardDomainError::MemberNotFound(_)))
        ),
        "missing member not reported: {missing_member:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn departing_member_is_removed_but_owner_stays(services: Services) -> Result<(), eyre::Report> {
    let board = services
        .mutations
        .create_board(
            CreateBoardRequest::new("Sprint 1", "alice").with_members(vec!["bob".to_owned()]),
        )
        .await?;

    let removed = services.mutations.remove_member(board.id(), "bob").await?;
    let owner = services.mutations.remove_member(board.id(), "alice").await;
    let members = services.queries.list_members(board.id()).await?;

    eyre::ensure!(removed.user_id().as_str() == "bob", "wrong member removed");
    eyre::ensure!(
        matches!(owner, Err(BoardServiceError::Domain(BoardDomainError::CannotRemoveOwner(_)))),
        "owner removal allowed: {owner:?}"
    );
    eyre::ensure!(members.len() == 1, "expected only the owner to remain");
    Ok(())
}
