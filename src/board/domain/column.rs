//! Board columns holding ordered cards.

use super::{BoardDomainError, Card, CardId, ColumnId, UserId, error::required_text};
use serde::{Deserialize, Serialize};

/// Titles of the columns every board starts with unless the caller supplies
/// its own layout.
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["Backlog", "InProgress", "Release"];

/// Ordered lane of cards on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    #[serde(default)]
    cards: Vec<Card>,
}

impl Column {
    pub(super) fn new(id: ColumnId, title: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id,
            title: required_text(title, "column title")?,
            cards: Vec::new(),
        })
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the card with the given identifier, if it lives in this column.
    #[must_use]
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == card_id)
    }

    pub(super) fn card_mut(&mut self, card_id: CardId) -> Result<&mut Card, BoardDomainError> {
        let column = self.id;
        self.cards
            .iter_mut()
            .find(|card| card.id() == card_id)
            .ok_or(BoardDomainError::CardNotFound {
                column,
                card: card_id,
            })
    }

    pub(super) fn unassign(&mut self, user_id: &UserId) {
        for card in &mut self.cards {
            card.unassign(user_id);
        }
    }

    pub(super) fn push_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Detaches a card from this column, preserving the order of the rest.
    pub(super) fn take_card(&mut self, card_id: CardId) -> Result<Card, BoardDomainError> {
        let position = self
            .cards
            .iter()
            .position(|card| card.id() == card_id)
            .ok_or(BoardDomainError::CardNotFound {
                column: self.id,
                card: card_id,
            })?;
        Ok(self.cards.remove(position))
    }
}
