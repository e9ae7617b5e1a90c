//! Cards and their nested sub-tasks and comments.

use super::{BoardDomainError, CardId, UserId, error::required_text};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Checklist item owned by a card, identified by its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,
    checked: bool,
}

impl Task {
    /// Creates an unchecked task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyField`] when the description is blank.
    pub fn new(description: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            description: required_text(description, "task description")?,
            checked: false,
        })
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the task has been ticked off.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    pub(super) const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// Comment left on a card by a board member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    text: String,
    author: UserId,
    timestamp: DateTime<Utc>,
    position: usize,
}

impl Comment {
    pub(super) fn new(
        text: impl Into<String>,
        author: UserId,
        timestamp: DateTime<Utc>,
        position: usize,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            text: required_text(text, "comment text")?,
            author,
            timestamp,
            position,
        })
    }

    /// Returns the comment body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the member who wrote the comment.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the index the comment was inserted at.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// Partial update for card details. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement executor; must be a board member.
    pub executor: Option<UserId>,
    /// Replacement start date.
    pub start_date: Option<NaiveDate>,
    /// Replacement end date.
    pub end_date: Option<NaiveDate>,
}

/// Unit of work placed in a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    executor: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl Card {
    pub(super) fn new(
        id: CardId,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id,
            title: required_text(title, "card title")?,
            description: description.filter(|text| !text.trim().is_empty()),
            executor: None,
            start_date: None,
            end_date: None,
            tasks: Vec::new(),
            comments: Vec::new(),
        })
    }

    /// Returns the card identifier.
    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    /// Returns the card title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the card description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the member assigned to the card, if any.
    #[must_use]
    pub const fn executor(&self) -> Option<&UserId> {
        self.executor.as_ref()
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planned end date.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the card's checklist in order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the card's comments in order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Applies a patch. Membership of the executor is checked by the board.
    pub(super) fn apply(&mut self, patch: CardPatch) -> Result<(), BoardDomainError> {
        let title = patch
            .title
            .map(|title| required_text(title, "card title"))
            .transpose()?;
        let start_date = patch.start_date.or(self.start_date);
        let end_date = patch.end_date.or(self.end_date);
        if let (Some(start), Some(end)) = (start_date, end_date)
            && end < start
        {
            return Err(BoardDomainError::InvalidDateRange { start, end });
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description).filter(|text| !text.trim().is_empty());
        }
        if let Some(executor) = patch.executor {
            self.executor = Some(executor);
        }
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }

    pub(super) fn unassign(&mut self, user_id: &UserId) {
        if self.executor.as_ref() == Some(user_id) {
            self.executor = None;
        }
    }

    pub(super) fn push_task(&mut self, task: Task) -> Task {
        self.tasks.push(task.clone());
        task
    }

    pub(super) fn task_at_mut(&mut self, position: usize) -> Result<&mut Task, BoardDomainError> {
        let card = self.id;
        self.tasks
            .get_mut(position)
            .ok_or(BoardDomainError::TaskNotFound { card, position })
    }

    pub(super) fn push_comment(
        &mut self,
        text: impl Into<String>,
        author: UserId,
        timestamp: DateTime<Utc>,
    ) -> Result<Comment, BoardDomainError> {
        let comment = Comment::new(text, author, timestamp, self.comments.len())?;
        self.comments.push(comment.clone());
        Ok(comment)
    }
}
