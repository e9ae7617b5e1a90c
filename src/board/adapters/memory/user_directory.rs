//! In-memory user directory seeded with known profiles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::UserId,
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult, UserProfile},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory containing the given profiles.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }

    /// Registers or replaces a profile.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Unavailable`] when the lock is poisoned.
    pub fn insert(&self, profile: UserProfile) -> UserDirectoryResult<()> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> UserDirectoryError {
    UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, user_id: &UserId) -> UserDirectoryResult<bool> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.contains_key(user_id))
    }

    async fn get(&self, user_id: &UserId) -> UserDirectoryResult<Option<UserProfile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.get(user_id).cloned())
    }
}
