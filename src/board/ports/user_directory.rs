//! Port onto the external user directory.
//!
//! User accounts, credentials, and avatars are owned elsewhere; the board
//! core only asks whether a user exists and reads profile fields to cache on
//! the member record.

use crate::board::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Public profile of a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Account identifier.
    pub user_id: UserId,
    /// Name shown next to the user's avatar.
    pub display_name: Option<String>,
    /// Location of the uploaded avatar image.
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Creates a profile with no display name or avatar.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            display_name: None,
            avatar_url: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

/// User identity lookups consumed by membership operations.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns whether an account with the identifier exists.
    async fn exists(&self, user_id: &UserId) -> UserDirectoryResult<bool>;

    /// Returns the account profile, or `None` when the user is unknown.
    async fn get(&self, user_id: &UserId) -> UserDirectoryResult<Option<UserProfile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// The directory could not be reached.
    #[error("user directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a transport or backend error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
