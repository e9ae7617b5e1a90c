//! HTTP adapter exposing the board services through axum.

pub mod dto;
pub mod error;
pub mod extract;
mod routes;

use crate::board::{
    ports::{BoardRepository, UserDirectory},
    services::{BoardMutationService, BoardQueryService, BoardServiceConfig},
};
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use mockable::DefaultClock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};

/// Mutation service as wired into the router.
pub type SharedMutationService =
    BoardMutationService<dyn BoardRepository, dyn UserDirectory, DefaultClock>;

/// Query service as wired into the router.
pub type SharedQueryService = BoardQueryService<dyn BoardRepository>;

/// Services shared by every request handler.
pub struct AppState {
    /// Write side.
    pub mutations: SharedMutationService,
    /// Read side.
    pub queries: SharedQueryService,
}

impl AppState {
    /// Wires both services over the same repository.
    #[must_use]
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        directory: Arc<dyn UserDirectory>,
        config: BoardServiceConfig,
    ) -> Self {
        Self {
            mutations: BoardMutationService::new(
                Arc::clone(&repository),
                directory,
                Arc::new(DefaultClock),
            )
            .with_config(config),
            queries: BoardQueryService::new(repository).with_config(config),
        }
    }
}

/// Builds the application router.
///
/// Board-scoped routes share the `{board_id}` segment name so that
/// `GET /boards/{owner}` and the nested resources do not collide in the
/// route table; the owner listing reads that segment as a user identifier.
pub fn router(state: Arc<AppState>) -> Router {
    const CARD: &str = "/boards/{board_id}/columns/{column_id}/cards/{card_id}";

    Router::new()
        .route("/", get(routes::status))
        .route("/boards", post(routes::create_board))
        .route("/boards/{board_id}", get(routes::list_boards_by_owner))
        .route("/board/{board_id}", get(routes::get_board))
        .route("/boards/{board_id}/columns", post(routes::add_column))
        .route(
            "/boards/{board_id}/columns/{column_id}",
            delete(routes::delete_column),
        )
        .route(
            "/boards/{board_id}/columns/{column_id}/cards",
            post(routes::add_card),
        )
        .route(
            CARD,
            patch(routes::update_card).delete(routes::delete_card),
        )
        .route(&format!("{CARD}/move/{{to}}"), put(routes::move_card))
        .route(&format!("{CARD}/tasks"), post(routes::add_task))
        .route(&format!("{CARD}/tasks/{{position}}"), put(routes::set_task_checked))
        .route(&format!("{CARD}/comments"), post(routes::add_comment))
        .route("/boards/{board_id}/members", get(routes::list_members))
        .route(
            "/boards/{board_id}/members/{member_id}",
            get(routes::get_member)
                .post(routes::add_member)
                .delete(routes::remove_member),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
