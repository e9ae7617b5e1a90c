//! Domain model for the board aggregate.
//!
//! A board and all of its columns, cards, tasks, comments, and members form a
//! single aggregate that is loaded, mutated, and persisted as one document.
//! Infrastructure concerns stay outside of the domain boundary.

mod board;
mod card;
mod column;
mod error;
mod ids;
mod member;

pub use board::{Board, BoardDraft, ColumnLayout, PersistedBoardData};
pub use card::{Card, CardPatch, Comment, Task};
pub use column::{Column, DEFAULT_COLUMN_TITLES};
pub use error::{BoardDomainError, BoardErrorKind};
pub use ids::{BoardId, BoardVersion, CardId, ColumnId, UserId};
pub use member::Member;
