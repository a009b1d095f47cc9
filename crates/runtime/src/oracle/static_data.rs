//! In-memory oracle implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use gacha_core::{CharacterRecord, RateTable};

use super::{CharacterDict, CommonConfig, GachaOracle, OracleError};

/// Oracle serving a fixed dataset from memory.
///
/// Used by tests and by hosts that already hold the dataset.
#[derive(Clone, Debug)]
pub struct StaticOracle {
    common: CommonConfig,
    characters: CharacterDict,
    rates: RateTable,
    assets: HashMap<String, Vec<u8>>,
}

impl StaticOracle {
    /// Create an oracle with no characters or assets.
    pub fn new(common: CommonConfig, rates: RateTable) -> Self {
        Self {
            common,
            characters: HashMap::new(),
            rates,
            assets: HashMap::new(),
        }
    }

    /// Add a character record to the dictionary.
    pub fn add_character(&mut self, record: CharacterRecord) {
        self.characters.insert(record.id, record);
    }

    /// Register raw asset bytes under `path`.
    pub fn add_asset(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(path.into(), bytes);
    }
}

#[async_trait]
impl GachaOracle for StaticOracle {
    async fn common_config(&self) -> Result<CommonConfig, OracleError> {
        Ok(self.common.clone())
    }

    async fn characters(&self) -> Result<CharacterDict, OracleError> {
        Ok(self.characters.clone())
    }

    async fn rate_table(&self) -> Result<RateTable, OracleError> {
        Ok(self.rates.clone())
    }

    async fn fetch_asset(&self, path: &str) -> Result<Vec<u8>, OracleError> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| OracleError::AssetNotFound(path.to_string()))
    }
}
