//! Error types for board aggregate validation and lookup.

use super::{CardId, ColumnId, UserId};
use chrono::NaiveDate;
use thiserror::Error;

/// Coarse classification shared by every board error type.
///
/// The HTTP adapter maps these onto status codes; callers use them to decide
/// whether a retry is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardErrorKind {
    /// A required field is missing or malformed.
    Validation,
    /// A board, column, card, task, member, or user does not resolve.
    NotFound,
    /// The request collides with existing state.
    Conflict,
    /// The persistence layer failed.
    Storage,
    /// A persistence call exceeded its time budget.
    Timeout,
}

/// Errors returned while constructing or mutating a board aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A required text field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The user identifier is empty, too long, or contains whitespace.
    #[error("invalid user identifier '{0}'")]
    InvalidUserId(String),

    /// The column does not exist on the board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The card does not exist in the named column.
    #[error("card {card} not found in column {column}")]
    CardNotFound {
        /// Column that was searched.
        column: ColumnId,
        /// Card that was requested.
        card: CardId,
    },

    /// The task position is out of range for the card.
    #[error("card {card} has no task at position {position}")]
    TaskNotFound {
        /// Card that was searched.
        card: CardId,
        /// Requested zero-based position.
        position: usize,
    },

    /// The user is not a member of the board.
    #[error("member not found: {0}")]
    MemberNotFound(UserId),

    /// The user is already a member of the board.
    #[error("user {0} is already a member of the board")]
    DuplicateMember(UserId),

    /// The board owner cannot leave their own board.
    #[error("the board owner {0} cannot be removed from the board")]
    CannotRemoveOwner(UserId),

    /// A card executor or comment author must belong to the board.
    #[error("user {0} is not a member of the board")]
    NotAMember(UserId),

    /// The card end date precedes its start date.
    #[error("end date {end} precedes start date {start}")]
    InvalidDateRange {
        /// Card start date.
        start: NaiveDate,
        /// Card end date.
        end: NaiveDate,
    },

    /// Two columns of a persisted board share an identifier.
    #[error("column identifier {0} appears more than once")]
    DuplicateColumnId(ColumnId),

    /// Two cards of a persisted board share an identifier.
    #[error("card identifier {0} appears more than once")]
    DuplicateCardId(CardId),
}

impl BoardDomainError {
    /// Returns the coarse error classification.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::EmptyField(_)
            | Self::InvalidUserId(_)
            | Self::CannotRemoveOwner(_)
            | Self::NotAMember(_)
            | Self::InvalidDateRange { .. } => BoardErrorKind::Validation,
            Self::ColumnNotFound(_)
            | Self::CardNotFound { .. }
            | Self::TaskNotFound { .. }
            | Self::MemberNotFound(_) => BoardErrorKind::NotFound,
            Self::DuplicateMember(_) => BoardErrorKind::Conflict,
            Self::DuplicateColumnId(_) | Self::DuplicateCardId(_) => BoardErrorKind::Storage,
        }
    }
}

/// Trims a required text field, rejecting empty values.
pub(super) fn required_text(
    value: impl Into<String>,
    field: &'static str,
) -> Result<String, BoardDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}
