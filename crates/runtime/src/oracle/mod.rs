//! Read-only access to the external game-data service.
//!
//! The data service publishes the per-region banner schedule, the character
//! dictionary, the rarity rate config and artwork. [`GachaOracle`] is the
//! seam the runtime consumes it through; the data is immutable for the
//! duration of a batch, while per-user state lives in repositories.
mod directory;
mod error;
mod static_data;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use gacha_core::{Banner, CharacterId, CharacterRecord, RateTable};

pub use directory::DirectoryOracle;
pub use error::OracleError;
pub use static_data::StaticOracle;

/// Characters keyed by id.
pub type CharacterDict = HashMap<CharacterId, CharacterRecord>;

/// Shared configuration document of the data service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommonConfig {
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// One game server region and its banner schedule.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub name: Option<String>,
    /// Banners in source order; the first active one is current.
    #[serde(default)]
    pub current_gacha: Vec<Banner>,
}

/// Lookup API of the external game-data service.
#[async_trait]
pub trait GachaOracle: Send + Sync {
    /// Region list with each region's banner schedule.
    async fn common_config(&self) -> Result<CommonConfig, OracleError>;

    /// Character dictionary keyed by id.
    async fn characters(&self) -> Result<CharacterDict, OracleError>;

    /// Base rates and rate-up chances for the current banner context.
    async fn rate_table(&self) -> Result<RateTable, OracleError>;

    /// Raw bytes of an asset such as a portrait image.
    async fn fetch_asset(&self, path: &str) -> Result<Vec<u8>, OracleError>;
}
