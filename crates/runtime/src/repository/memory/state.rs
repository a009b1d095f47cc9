//! In-memory UserStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use gacha_core::UserGachaState;

use crate::repository::{RepositoryError, Result, UserStore};

/// In-memory implementation of UserStore.
///
/// Follows the same lazy-default contract as the file store; the write lock
/// doubles as the single-writer guard.
pub struct InMemoryUserStore {
    states: RwLock<HashMap<String, UserGachaState>>,
}

impl InMemoryUserStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Number of users with a record.
    pub fn len(&self) -> usize {
        self.states.read().map(|states| states.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the stored state without creating a default record.
    pub fn get(&self, user_id: &str) -> Result<Option<UserGachaState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(user_id).cloned())
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn load(&self, user_id: &str) -> Result<UserGachaState> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.entry(user_id.to_string()).or_default().clone())
    }

    fn save(&self, user_id: &str, state: &UserGachaState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(user_id.to_string(), state.clone());
        Ok(())
    }
}
