//! Application services for board orchestration.

mod error;
mod mutation;
mod query;
mod store;

pub use error::{BoardServiceError, BoardServiceResult};
pub use mutation::{
    AddCardRequest, BoardMutationService, CreateBoardRequest, UpdateCardRequest,
};
pub use query::BoardQueryService;
pub use store::{BoardServiceConfig, DEFAULT_STORE_TIMEOUT};
