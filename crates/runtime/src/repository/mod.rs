//! Repository layer for per-user gacha state.
//!
//! Repositories hold data that CHANGES across draw batches:
//! - Collected characters per user
//! - Pulls since the last top-rarity pickup
//!
//! Static game data (banners, characters, rates, artwork) is read through
//! oracles, not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileUserStore;
pub use memory::InMemoryUserStore;
pub use traits::UserStore;
