//! Request handlers for the board API.

use super::{
    AppState,
    dto::{
        AddCardBody, AddColumnBody, AddCommentBody, AddTaskBody, CreateBoardBody,
        SetTaskCheckedBody, StatusBody, UpdateCardBody,
    },
    error::ApiError,
    extract::{ApiJson, ApiPath},
};
use crate::board::domain::{
    Board, BoardId, Card, CardId, Column, ColumnId, Comment, Member, Task,
};
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

type ApiResult<T> = Result<T, ApiError>;
type Shared = State<Arc<AppState>>;

fn parse_uuid(raw: &str, what: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("malformed {what} id: {raw}")))
}

fn board_id(raw: &str) -> ApiResult<BoardId> {
    parse_uuid(raw, "board").map(BoardId::from_uuid)
}

fn column_id(raw: &str) -> ApiResult<ColumnId> {
    parse_uuid(raw, "column").map(ColumnId::from_uuid)
}

fn card_id(raw: &str) -> ApiResult<CardId> {
    parse_uuid(raw, "card").map(CardId::from_uuid)
}

fn task_position(raw: &str) -> ApiResult<usize> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("malformed task position: {raw}")))
}

/// `GET /`
pub async fn status() -> Json<StatusBody> {
    Json(StatusBody {
        title: "Taskboard",
        message: "The api is working!",
    })
}

/// `POST /boards`
pub async fn create_board(
    State(state): Shared,
    ApiJson(body): ApiJson<CreateBoardBody>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    let board = state.mutations.create_board(body.into()).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// `GET /boards/{owner}`
pub async fn list_boards_by_owner(
    State(state): Shared,
    ApiPath(owner): ApiPath<String>,
) -> ApiResult<Json<Vec<Board>>> {
    let boards = state.queries.list_boards_by_owner(&owner).await?;
    Ok(Json(boards))
}

/// `GET /board/{board_id}`
pub async fn get_board(
    State(state): Shared,
    ApiPath(raw_board): ApiPath<String>,
) -> ApiResult<Json<Board>> {
    let board = state.queries.get_board(board_id(&raw_board)?).await?;
    Ok(Json(board))
}

/// `POST /boards/{board_id}/columns`
pub async fn add_column(
    State(state): Shared,
    ApiPath(raw_board): ApiPath<String>,
    ApiJson(body): ApiJson<AddColumnBody>,
) -> ApiResult<(StatusCode, Json<Column>)> {
    let column = state
        .mutations
        .add_column(board_id(&raw_board)?, body.title)
        .await?;
    Ok((StatusCode::CREATED, Json(column)))
}

/// `DELETE /boards/{board_id}/columns/{column_id}`
pub async fn delete_column(
    State(state): Shared,
    ApiPath((raw_board, raw_column)): ApiPath<(String, String)>,
) -> ApiResult<Json<Column>> {
    let column = state
        .mutations
        .delete_column(board_id(&raw_board)?, column_id(&raw_column)?)
        .await?;
    Ok(Json(column))
}

/// `POST /boards/{board_id}/columns/{column_id}/cards`
pub async fn add_card(
    State(state): Shared,
    ApiPath((raw_board, raw_column)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<AddCardBody>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let card = state
        .mutations
        .add_card(board_id(&raw_board)?, column_id(&raw_column)?, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// `PATCH /boards/{board_id}/columns/{column_id}/cards/{card_id}`
pub async fn update_card(
    State(state): Shared,
    ApiPath((raw_board, raw_column, raw_card)): ApiPath<(String, String, String)>,
    ApiJson(body): ApiJson<UpdateCardBody>,
) -> ApiResult<Json<Card>> {
    let card = state
        .mutations
        .update_card(
            board_id(&raw_board)?,
            column_id(&raw_column)?,
            card_id(&raw_card)?,
            body.into(),
        )
        .await?;
    Ok(Json(card))
}

/// `PUT /boards/{board_id}/columns/{column_id}/cards/{card_id}/move/{to}`
pub async fn move_card(
    State(state): Shared,
    ApiPath((raw_board, raw_from, raw_card, raw_to)): ApiPath<(String, String, String, String)>,
) -> ApiResult<Json<Card>> {
    let card = state
        .mutations
        .move_card(
            board_id(&raw_board)?,
            column_id(&raw_from)?,
            column_id(&raw_to)?,
            card_id(&raw_card)?,
        )
        .await?;
    Ok(Json(card))
}

/// `DELETE /boards/{board_id}/columns/{column_id}/cards/{card_id}`
pub async fn delete_card(
    State(state): Shared,
    ApiPath((raw_board, raw_column, raw_card)): ApiPath<(String, String, String)>,
) -> ApiResult<Json<Card>> {
    let card = state
        .mutations
        .delete_card(
            board_id(&raw_board)?,
            column_id(&raw_column)?,
            card_id(&raw_card)?,
        )
        .await?;
    Ok(Json(card))
}

/// `POST .../cards/{card_id}/tasks`
pub async fn add_task(
    State(state): Shared,
    ApiPath((raw_board, raw_column, raw_card)): ApiPath<(String, String, String)>,
    ApiJson(body): ApiJson<AddTaskBody>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .mutations
        .add_task(
            board_id(&raw_board)?,
            column_id(&raw_column)?,
            card_id(&raw_card)?,
            body.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT .../cards/{card_id}/tasks/{position}`
pub async fn set_task_checked(
    State(state): Shared,
    ApiPath((raw_board, raw_column, raw_card, raw_position)): ApiPath<(String, String, String, String)>,
    ApiJson(body): ApiJson<SetTaskCheckedBody>,
) -> ApiResult<Json<Task>> {
    let task = state
        .mutations
        .set_task_checked(
            board_id(&raw_board)?,
            column_id(&raw_column)?,
            card_id(&raw_card)?,
            task_position(&raw_position)?,
            body.checked,
        )
        .await?;
    Ok(Json(task))
}

/// `POST .../cards/{card_id}/comments`
pub async fn add_comment(
    State(state): Shared,
    ApiPath((raw_board, raw_column, raw_card)): ApiPath<(String, String, String)>,
    ApiJson(body): ApiJson<AddCommentBody>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = state
        .mutations
        .add_comment(
            board_id(&raw_board)?,
            column_id(&raw_column)?,
            card_id(&raw_card)?,
            &body.author,
            body.text,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /boards/{board_id}/members`
pub async fn list_members(
    State(state): Shared,
    ApiPath(raw_board): ApiPath<String>,
) -> ApiResult<Json<Vec<Member>>> {
    let members = state.queries.list_members(board_id(&raw_board)?).await?;
    Ok(Json(members))
}

/// `GET /boards/{board_id}/members/{member_id}`
pub async fn get_member(
    State(state): Shared,
    ApiPath((raw_board, member_id)): ApiPath<(String, String)>,
) -> ApiResult<Json<Member>> {
    let member = state
        .queries
        .get_member(board_id(&raw_board)?, &member_id)
        .await?;
    Ok(Json(member))
}

/// `POST /boards/{board_id}/members/{member_id}`
pub async fn add_member(
    State(state): Shared,
    ApiPath((raw_board, member_id)): ApiPath<(String, String)>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let member = state
        .mutations
        .add_member(board_id(&raw_board)?, &member_id)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// `DELETE /boards/{board_id}/members/{member_id}`
pub async fn remove_member(
    State(state): Shared,
    ApiPath((raw_board, member_id)): ApiPath<(String, String)>,
) -> ApiResult<Json<Member>> {
    let member = state
        .mutations
        .remove_member(board_id(&raw_board)?, &member_id)
        .await?;
    Ok(Json(member))
}
