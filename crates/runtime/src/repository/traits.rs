//! Repository contract for loading and saving per-user gacha state.

use gacha_core::UserGachaState;

use super::Result;

/// Key-value store of user id → [`UserGachaState`].
///
/// Implementations must serialize every `load` and `save` on one instance so
/// that a read-modify-write never interleaves with another writer. Callers
/// that need a whole draw batch to be atomic hold an additional per-user lock
/// across the `load` → `save` pair.
pub trait UserStore: Send + Sync {
    /// Load a user's state.
    ///
    /// Unknown users get a fresh default state, which is persisted before
    /// returning so repeated loads are stable.
    fn load(&self, user_id: &str) -> Result<UserGachaState>;

    /// Overwrite a user's state.
    fn save(&self, user_id: &str, state: &UserGachaState) -> Result<()>;
}
