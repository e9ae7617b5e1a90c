//! Service layer for board creation and in-place mutations.
//!
//! Each operation loads the board, applies one change to that in-memory copy,
//! and writes the whole document back with the version it was loaded at. A
//! failed change is never written, and a concurrent writer that saved first
//! turns the write into a conflict instead of silently overwriting it.

use super::{
    BoardServiceConfig, BoardServiceError, BoardServiceResult,
    store::{BoardStore, bounded},
};
use crate::board::{
    domain::{
        Board, BoardDomainError, BoardDraft, BoardId, Card, CardId, CardPatch, Column,
        ColumnId, ColumnLayout, Comment, Member, Task, UserId,
    },
    ports::{BoardRepository, UserDirectory},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardRequest {
    title: String,
    owner: String,
    members: Vec<String>,
    columns: Option<Vec<String>>,
}

impl CreateBoardRequest {
    /// Creates a request with the default column layout and no extra members.
    #[must_use]
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            owner: owner.into(),
            members: Vec::new(),
            columns: None,
        }
    }

    /// Sets additional initial members.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = String>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    /// Replaces the default column layout.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = String>) -> Self {
        self.columns = Some(columns.into_iter().collect());
        self
    }
}

/// Request payload for adding a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCardRequest {
    title: String,
    description: Option<String>,
}

impl AddCardRequest {
    /// Creates a request with a title only.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the card description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for updating card details. Unset fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCardRequest {
    title: Option<String>,
    description: Option<String>,
    executor: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl UpdateCardRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Assigns the card to a board member.
    #[must_use]
    pub fn with_executor(mut self, executor: impl Into<String>) -> Self {
        self.executor = Some(executor.into());
        self
    }

    /// Sets the planned start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the planned end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    fn into_patch(self) -> Result<CardPatch, BoardDomainError> {
        Ok(CardPatch {
            title: self.title,
            description: self.description,
            executor: self.executor.map(UserId::new).transpose()?,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Board mutation orchestration service.
pub struct BoardMutationService<R, D, C>
where
    R: BoardRepository + ?Sized,
    D: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    store: BoardStore<R>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> Clone for BoardMutationService<R, D, C>
where
    R: BoardRepository + ?Sized,
    D: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, D, C> BoardMutationService<R, D, C>
where
    R: BoardRepository + ?Sized,
    D: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new mutation service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store: BoardStore::new(repository, BoardServiceConfig::default().store_timeout),
            directory,
            clock,
        }
    }

    /// Applies service configuration.
    #[must_use]
    pub fn with_config(mut self, config: BoardServiceConfig) -> Self {
        self.store = self.store.with_timeout(config.store_timeout);
        self
    }

    /// Creates and stores a new board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title, owner, members,
    /// or column titles fail validation, or a storage error when the board
    /// cannot be written.
    #[tracing::instrument(skip_all)]
    pub async fn create_board(&self, request: CreateBoardRequest) -> BoardServiceResult<Board> {
        let CreateBoardRequest {
            title,
            owner,
            members,
            columns,
        } = request;

        let owner = UserId::new(owner)?;
        let members = members
            .into_iter()
            .map(|member| UserId::new(member).map(Member::new))
            .collect::<Result<Vec<_>, _>>()?;
        let layout = columns.map_or(ColumnLayout::Default, ColumnLayout::Custom);
        let draft = BoardDraft::new(title, owner)
            .with_layout(layout)
            .with_members(members);

        let board = Board::create(draft, &*self.clock)?;
        self.store.insert(&board).await?;
        tracing::info!(board_id = %board.id(), owner = %board.owner(), "board created");
        Ok(board)
    }

    /// Appends an empty column to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`] for an unknown board or
    /// [`BoardServiceError::Domain`] for a blank title.
    #[tracing::instrument(skip_all, fields(board_id = %board_id))]
    pub async fn add_column(
        &self,
        board_id: BoardId,
        title: impl Into<String> + Send,
    ) -> BoardServiceResult<Column> {
        self.mutate(board_id, |board, clock| board.add_column(title, clock))
            .await
    }

    /// Removes a column and every card in it.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board or column is absent.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, column_id = %column_id))]
    pub async fn delete_column(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
    ) -> BoardServiceResult<Column> {
        self.mutate(board_id, |board, clock| board.delete_column(column_id, clock))
            .await
    }

    /// Appends a card to a column.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board or column is absent, or
    /// [`BoardServiceError::Domain`] for a blank title.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, column_id = %column_id))]
    pub async fn add_card(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        request: AddCardRequest,
    ) -> BoardServiceResult<Card> {
        let AddCardRequest { title, description } = request;
        self.mutate(board_id, |board, clock| {
            board.add_card(column_id, title, description, clock)
        })
        .await
    }

    /// Updates card details.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board, column, or card is absent,
    /// or [`BoardServiceError::Domain`] when the executor is not a member or
    /// the dates are out of order.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, card_id = %card_id))]
    pub async fn update_card(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        card_id: CardId,
        request: UpdateCardRequest,
    ) -> BoardServiceResult<Card> {
        let patch = request.into_patch()?;
        self.mutate(board_id, |board, clock| {
            board.update_card(column_id, card_id, patch, clock)
        })
        .await
    }

    /// Moves a card to the end of another column.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board, either column, or the card
    /// within the source column is absent. Nothing is written in that case.
    #[tracing::instrument(
        skip_all,
        fields(board_id = %board_id, from = %from_column_id, to = %to_column_id, card_id = %card_id)
    )]
    pub async fn move_card(
        &self,
        board_id: BoardId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        card_id: CardId,
    ) -> BoardServiceResult<Card> {
        let card = self
            .mutate(board_id, |board, clock| {
                board.move_card(from_column_id, to_column_id, card_id, clock)
            })
            .await?;
        tracing::info!("card moved");
        Ok(card)
    }

    /// Removes a card from a column.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board, column, or card is absent.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, card_id = %card_id))]
    pub async fn delete_card(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        card_id: CardId,
    ) -> BoardServiceResult<Card> {
        self.mutate(board_id, |board, clock| {
            board.delete_card(column_id, card_id, clock)
        })
        .await
    }

    /// Appends an unchecked task to a card.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board, column, or card is absent,
    /// or [`BoardServiceError::Domain`] for a blank description.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, card_id = %card_id))]
    pub async fn add_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        card_id: CardId,
        description: impl Into<String> + Send,
    ) -> BoardServiceResult<Task> {
        self.mutate(board_id, |board, clock| {
            board.add_task(column_id, card_id, description, clock)
        })
        .await
    }

    /// Ticks or unticks a task.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board, column, card, or task
    /// position is absent.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, card_id = %card_id, position = position))]
    pub async fn set_task_checked(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        card_id: CardId,
        position: usize,
        checked: bool,
    ) -> BoardServiceResult<Task> {
        self.mutate(board_id, |board, clock| {
            board.set_task_checked(column_id, card_id, position, checked, clock)
        })
        .await
    }

    /// Adds a comment written by a board member.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board, column, or card is absent,
    /// or [`BoardServiceError::Domain`] when the author is not a member or
    /// the text is blank.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, card_id = %card_id))]
    pub async fn add_comment(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        card_id: CardId,
        author: &str,
        text: impl Into<String> + Send,
    ) -> BoardServiceResult<Comment> {
        let author = UserId::new(author)?;
        self.mutate(board_id, |board, clock| {
            board.add_comment(column_id, card_id, author, text, clock)
        })
        .await
    }

    /// Adds a known user to the board, caching their directory profile.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`] for an unknown board,
    /// [`BoardServiceError::UnknownUser`] when the directory does not know
    /// the user, or a conflict when the user is already a member.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, user_id = user_id))]
    pub async fn add_member(&self, board_id: BoardId, user_id: &str) -> BoardServiceResult<Member> {
        let user_id = UserId::new(user_id)?;
        let mut board = self.store.load(board_id).await?;
        if board.is_member(&user_id) {
            tracing::warn!("user is already a member");
            return Err(BoardDomainError::DuplicateMember(user_id).into());
        }

        let timeout = self.store.timeout();
        if !bounded("check user", timeout, self.directory.exists(&user_id)).await? {
            return Err(BoardServiceError::UnknownUser(user_id));
        }
        let profile = bounded("fetch user profile", timeout, self.directory.get(&user_id))
            .await?
            .ok_or_else(|| BoardServiceError::UnknownUser(user_id.clone()))?;

        let mut member = Member::new(user_id);
        if let Some(display_name) = profile.display_name {
            member = member.with_display_name(display_name);
        }
        if let Some(avatar_url) = profile.avatar_url {
            member = member.with_avatar_url(avatar_url);
        }

        let observed = board.version();
        let added = board.add_member(member, &*self.clock)?;
        self.store.replace(&board, observed).await?;
        tracing::info!("member added");
        Ok(added)
    }

    /// Removes a member other than the owner.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the board or member is absent, or
    /// [`BoardServiceError::Domain`] when removing the owner.
    #[tracing::instrument(skip_all, fields(board_id = %board_id, user_id = user_id))]
    pub async fn remove_member(
        &self,
        board_id: BoardId,
        user_id: &str,
    ) -> BoardServiceResult<Member> {
        let user_id = UserId::new(user_id)?;
        self.mutate(board_id, |board, clock| board.remove_member(&user_id, clock))
            .await
    }

    /// Loads a board, applies `apply` to the copy, and writes it back once.
    async fn mutate<T, F>(&self, board_id: BoardId, apply: F) -> BoardServiceResult<T>
    where
        F: FnOnce(&mut Board, &C) -> Result<T, BoardDomainError> + Send,
        T: Send,
    {
        let mut board = self.store.load(board_id).await?;
        let observed = board.version();
        let outcome = apply(&mut board, &*self.clock)?;
        self.store.replace(&board, observed).await?;
        Ok(outcome)
    }
}
