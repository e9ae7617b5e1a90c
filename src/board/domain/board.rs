//! Board aggregate root.
//!
//! A board is a single document: columns own cards, cards own tasks and
//! comments, and the member set sits alongside. Every mutation goes through
//! [`Board`] so the structural invariants hold after each successful call:
//!
//! - column identifiers are unique within the board;
//! - card identifiers are unique across all columns;
//! - each card lives in exactly one column;
//! - member user identifiers are unique.
//!
//! Failed mutations may leave the in-memory copy partially edited; callers
//! discard the copy instead of persisting it.

use super::{
    BoardDomainError, BoardId, BoardVersion, Card, CardId, CardPatch, Column, ColumnId, Comment,
    DEFAULT_COLUMN_TITLES, Member, Task, UserId, error::required_text,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::HashSet;

/// Initial column layout for a new board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `Backlog`, `InProgress`, `Release`.
    #[default]
    Default,
    /// Caller-supplied column titles, possibly none.
    Custom(Vec<String>),
}

/// Validated input for creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDraft {
    title: String,
    owner: UserId,
    layout: ColumnLayout,
    members: Vec<Member>,
}

impl BoardDraft {
    /// Starts a draft with the default column layout.
    #[must_use]
    pub fn new(title: impl Into<String>, owner: UserId) -> Self {
        Self {
            title: title.into(),
            owner,
            layout: ColumnLayout::Default,
            members: Vec::new(),
        }
    }

    /// Overrides the column layout.
    #[must_use]
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the initial members in addition to the owner.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    id: BoardId,
    title: String,
    owner: UserId,
    columns: Vec<Column>,
    members: Vec<Member>,
    version: BoardVersion,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted title.
    pub title: String,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted columns with their cards.
    pub columns: Vec<Column>,
    /// Persisted member set.
    pub members: Vec<Member>,
    /// Persisted document version.
    pub version: BoardVersion,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board from a draft.
    ///
    /// The owner is always the first member. Listing the owner again among
    /// the draft members is accepted and has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyField`] for a blank board or column
    /// title and [`BoardDomainError::DuplicateMember`] when a draft member is
    /// listed twice.
    pub fn create(draft: BoardDraft, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let BoardDraft {
            title,
            owner,
            layout,
            members: draft_members,
        } = draft;
        let title = required_text(title, "board title")?;

        let column_titles: Vec<String> = match layout {
            ColumnLayout::Default => DEFAULT_COLUMN_TITLES
                .iter()
                .map(|column_title| (*column_title).to_owned())
                .collect(),
            ColumnLayout::Custom(titles) => titles,
        };
        let columns = column_titles
            .into_iter()
            .map(|column_title| Column::new(ColumnId::new(), column_title))
            .collect::<Result<Vec<_>, _>>()?;

        let mut members = vec![Member::new(owner.clone())];
        for member in draft_members {
            if member.user_id() == &owner {
                continue;
            }
            if members.iter().any(|m| m.user_id() == member.user_id()) {
                return Err(BoardDomainError::DuplicateMember(member.user_id().clone()));
            }
            members.push(member);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: BoardId::new(),
            title,
            owner,
            columns,
            members,
            version: BoardVersion::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a board from persisted storage, re-checking invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumnId`],
    /// [`BoardDomainError::DuplicateCardId`], or
    /// [`BoardDomainError::DuplicateMember`] when the stored document is
    /// structurally inconsistent.
    pub fn from_persisted(data: PersistedBoardData) -> Result<Self, BoardDomainError> {
        let board = Self {
            id: data.id,
            title: data.title,
            owner: data.owner,
            columns: data.columns,
            members: data.members,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        board.check_invariants()?;
        Ok(board)
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the members in join order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the document version.
    #[must_use]
    pub const fn version(&self) -> BoardVersion {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Finds a column by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when the column is absent.
    pub fn find_column(&self, column_id: ColumnId) -> Result<&Column, BoardDomainError> {
        self.columns
            .iter()
            .find(|column| column.id() == column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))
    }

    /// Finds the first column with the given title.
    #[must_use]
    pub fn find_column_by_title(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.title() == title)
    }

    /// Finds a card within a specific column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] or
    /// [`BoardDomainError::CardNotFound`] when either lookup misses.
    pub fn find_card(&self, column_id: ColumnId, card_id: CardId) -> Result<&Card, BoardDomainError> {
        self.find_column(column_id)?
            .card(card_id)
            .ok_or(BoardDomainError::CardNotFound {
                column: column_id,
                card: card_id,
            })
    }

    /// Finds a member by user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::MemberNotFound`] when the user is not a
    /// member.
    pub fn find_member(&self, user_id: &UserId) -> Result<&Member, BoardDomainError> {
        self.members
            .iter()
            .find(|member| member.user_id() == user_id)
            .ok_or_else(|| BoardDomainError::MemberNotFound(user_id.clone()))
    }

    /// Returns whether the user belongs to the board.
    #[must_use]
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|member| member.user_id() == user_id)
    }

    /// Appends an empty column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyField`] for a blank title.
    pub fn add_column(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Column, BoardDomainError> {
        let column = Column::new(self.fresh_column_id(), title)?;
        self.columns.push(column.clone());
        self.touch(clock);
        Ok(column)
    }

    /// Removes a column together with its cards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when the column is absent.
    pub fn delete_column(
        &mut self,
        column_id: ColumnId,
        clock: &impl Clock,
    ) -> Result<Column, BoardDomainError> {
        let position = self.column_position(column_id)?;
        let removed = self.columns.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Appends a card with empty task and comment lists to a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when the column is absent
    /// or [`BoardDomainError::EmptyField`] for a blank title.
    pub fn add_card(
        &mut self,
        column_id: ColumnId,
        title: impl Into<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Card, BoardDomainError> {
        let card = Card::new(self.fresh_card_id(), title, description)?;
        self.column_mut(column_id)?.push_card(card.clone());
        self.touch(clock);
        Ok(card)
    }

    /// Moves a card to the end of another column, keeping its identifier and
    /// contents.
    ///
    /// The destination is resolved before the card is detached, so a lookup
    /// failure never leaves the card outside every column. Moving a card
    /// within one column sends it to the end of that column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when either column is
    /// absent or [`BoardDomainError::CardNotFound`] when the card is not in
    /// the source column.
    pub fn move_card(
        &mut self,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        card_id: CardId,
        clock: &impl Clock,
    ) -> Result<Card, BoardDomainError> {
        let to_position = self.column_position(to_column_id)?;
        let card = self.column_mut(from_column_id)?.take_card(card_id)?;
        let moved = card.clone();
        let Some(destination) = self.columns.get_mut(to_position) else {
            return Err(BoardDomainError::ColumnNotFound(to_column_id));
        };
        destination.push_card(card);
        self.touch(clock);
        Ok(moved)
    }

    /// Removes a card from a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] or
    /// [`BoardDomainError::CardNotFound`] when either lookup misses.
    pub fn delete_card(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        clock: &impl Clock,
    ) -> Result<Card, BoardDomainError> {
        let removed = self.column_mut(column_id)?.take_card(card_id)?;
        self.touch(clock);
        Ok(removed)
    }

    /// Updates card details.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when the card is absent,
    /// [`BoardDomainError::NotAMember`] when the executor does not belong to
    /// the board, or [`BoardDomainError::InvalidDateRange`] when the end date
    /// precedes the start date.
    pub fn update_card(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        patch: CardPatch,
        clock: &impl Clock,
    ) -> Result<Card, BoardDomainError> {
        if let Some(executor) = patch.executor.as_ref()
            && !self.is_member(executor)
        {
            return Err(BoardDomainError::NotAMember(executor.clone()));
        }
        let card = self.card_mut(column_id, card_id)?;
        card.apply(patch)?;
        let updated = card.clone();
        self.touch(clock);
        Ok(updated)
    }

    /// Appends an unchecked task to a card.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when the card is absent or
    /// [`BoardDomainError::EmptyField`] for a blank description.
    pub fn add_task(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Task, BoardDomainError> {
        let task = Task::new(description)?;
        let added = self.card_mut(column_id, card_id)?.push_task(task);
        self.touch(clock);
        Ok(added)
    }

    /// Ticks or unticks the task at `position`.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when the card is absent or
    /// [`BoardDomainError::TaskNotFound`] when the position is out of range.
    pub fn set_task_checked(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        position: usize,
        checked: bool,
        clock: &impl Clock,
    ) -> Result<Task, BoardDomainError> {
        let task = self.card_mut(column_id, card_id)?.task_at_mut(position)?;
        task.set_checked(checked);
        let updated = task.clone();
        self.touch(clock);
        Ok(updated)
    }

    /// Appends a comment written by a board member.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotAMember`] when the author does not
    /// belong to the board, a lookup error when the card is absent, or
    /// [`BoardDomainError::EmptyField`] for a blank text.
    pub fn add_comment(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        author: UserId,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Comment, BoardDomainError> {
        if !self.is_member(&author) {
            return Err(BoardDomainError::NotAMember(author));
        }
        let timestamp = clock.utc();
        let comment = self
            .card_mut(column_id, card_id)?
            .push_comment(text, author, timestamp)?;
        self.touch(clock);
        Ok(comment)
    }

    /// Adds a member.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateMember`] when the user already
    /// belongs to the board.
    pub fn add_member(
        &mut self,
        member: Member,
        clock: &impl Clock,
    ) -> Result<Member, BoardDomainError> {
        if self.is_member(member.user_id()) {
            return Err(BoardDomainError::DuplicateMember(member.user_id().clone()));
        }
        self.members.push(member.clone());
        self.touch(clock);
        Ok(member)
    }

    /// Removes a member other than the owner and clears them as executor
    /// from every card they were assigned to.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::CannotRemoveOwner`] for the owner or
    /// [`BoardDomainError::MemberNotFound`] when the user is not a member.
    pub fn remove_member(
        &mut self,
        user_id: &UserId,
        clock: &impl Clock,
    ) -> Result<Member, BoardDomainError> {
        if user_id == &self.owner {
            return Err(BoardDomainError::CannotRemoveOwner(user_id.clone()));
        }
        let position = self
            .members
            .iter()
            .position(|member| member.user_id() == user_id)
            .ok_or_else(|| BoardDomainError::MemberNotFound(user_id.clone()))?;
        let removed = self.members.remove(position);
        for column in &mut self.columns {
            column.unassign(user_id);
        }
        self.touch(clock);
        Ok(removed)
    }

    fn column_position(&self, column_id: ColumnId) -> Result<usize, BoardDomainError> {
        self.columns
            .iter()
            .position(|column| column.id() == column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))
    }

    fn column_mut(&mut self, column_id: ColumnId) -> Result<&mut Column, BoardDomainError> {
        self.columns
            .iter_mut()
            .find(|column| column.id() == column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))
    }

    fn card_mut(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
    ) -> Result<&mut Card, BoardDomainError> {
        self.column_mut(column_id)?.card_mut(card_id)
    }

    fn contains_card(&self, card_id: CardId) -> bool {
        self.columns
            .iter()
            .any(|column| column.card(card_id).is_some())
    }

    fn fresh_column_id(&self) -> ColumnId {
        loop {
            let candidate = ColumnId::new();
            if self.column_position(candidate).is_err() {
                return candidate;
            }
        }
    }

    fn fresh_card_id(&self) -> CardId {
        loop {
            let candidate = CardId::new();
            if !self.contains_card(candidate) {
                return candidate;
            }
        }
    }

    fn check_invariants(&self) -> Result<(), BoardDomainError> {
        let mut column_ids = HashSet::new();
        let mut card_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(column.id()) {
                return Err(BoardDomainError::DuplicateColumnId(column.id()));
            }
            for card in column.cards() {
                if !card_ids.insert(card.id()) {
                    return Err(BoardDomainError::DuplicateCardId(card.id()));
                }
            }
        }

        let mut user_ids = HashSet::new();
        for member in &self.members {
            if !user_ids.insert(member.user_id()) {
                return Err(BoardDomainError::DuplicateMember(member.user_id().clone()));
            }
        }
        Ok(())
    }

    /// Advances the version and modification timestamp.
    fn touch(&mut self, clock: &impl Clock) {
        self.version = self.version.next();
        self.updated_at = clock.utc();
    }
}
