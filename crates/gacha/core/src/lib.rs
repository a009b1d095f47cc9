//! Pure gacha rules shared by the runtime and offline tools.
//!
//! `gacha-core` defines the canonical draw model (rarity tiers, pickup
//! rate-up, pity tracking) and exposes side-effect free APIs. Randomness is
//! always injected by the caller so batches can be replayed from a seed, and
//! all persistence or rendering lives in the runtime crate.
//!
//! Modules are organized by responsibility:
//! - [`character`] identifies characters and their rarity tiers
//! - [`rates`] turns the base-rate / rate-up config into a typed table
//! - [`banner`] resolves the active banner and splits its pickup pools
//! - [`state`] holds the per-user collection state
//! - [`engine`] performs the weighted draws for one batch
pub mod banner;
pub mod character;
pub mod config;
pub mod engine;
pub mod rates;
pub mod state;

pub use banner::{Banner, PickupPools, TimeWindow, find_current_banner};
pub use character::{CharacterId, CharacterRecord, Rarity};
pub use config::DrawConfig;
pub use engine::{BatchReport, DrawEngine, DrawError, DrawResult, PoolKind, WeightedPool};
pub use rates::{PickupRate, RarityBaseRate, RateTable, RateTableError};
pub use state::UserGachaState;

#[cfg(feature = "serde")]
pub use rates::{BaseRateEntry, PickupRateEntry, RateConfig};
