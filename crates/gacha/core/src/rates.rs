//! Base rates and rate-up chances per rarity tier.
//!
//! The data service publishes rates as a loosely typed document keyed by the
//! rarity string. [`RateTable`] is the validated form the engine consumes.

use thiserror::Error;

use crate::character::{CharacterId, Rarity};

/// Probability mass of one rarity tier and the characters eligible in it.
#[derive(Clone, Debug, PartialEq)]
pub struct RarityBaseRate {
    pub rarity: Rarity,
    pub chance: f64,
    pub characters: Vec<CharacterId>,
}

/// Probability mass reserved for a banner's pickup characters at one tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupRate {
    pub rarity: Rarity,
    pub chance: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum RateTableError {
    #[error("missing base rate for rarity {0}")]
    MissingBaseRate(Rarity),

    #[error("invalid chance {chance} for rarity {rarity}")]
    InvalidChance { rarity: Rarity, chance: f64 },
}

/// Validated rate configuration for one banner context.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable {
    top: RarityBaseRate,
    second: RarityBaseRate,
    bottom: RarityBaseRate,
    pickup_top: PickupRate,
    pickup_second: PickupRate,
}

impl RateTable {
    /// Builds a table from per-tier base rates and rate-up chances.
    ///
    /// `pickup_top` and `pickup_second` are the chances reserved for pickup
    /// characters at rarity 3 and 2.
    pub fn new(
        top: RarityBaseRate,
        second: RarityBaseRate,
        bottom: RarityBaseRate,
        pickup_top: f64,
        pickup_second: f64,
    ) -> Result<Self, RateTableError> {
        for base in [&top, &second, &bottom] {
            check_chance(base.rarity, base.chance)?;
        }
        check_chance(Rarity::Three, pickup_top)?;
        check_chance(Rarity::Two, pickup_second)?;

        Ok(Self {
            top,
            second,
            bottom,
            pickup_top: PickupRate {
                rarity: Rarity::Three,
                chance: pickup_top,
            },
            pickup_second: PickupRate {
                rarity: Rarity::Two,
                chance: pickup_second,
            },
        })
    }

    pub fn base(&self, rarity: Rarity) -> &RarityBaseRate {
        match rarity {
            Rarity::Three => &self.top,
            Rarity::Two => &self.second,
            Rarity::One => &self.bottom,
        }
    }

    /// Rate-up chance for a tier. Rarity 1 never has a rate-up.
    pub fn pickup(&self, rarity: Rarity) -> Option<&PickupRate> {
        match rarity {
            Rarity::Three => Some(&self.pickup_top),
            Rarity::Two => Some(&self.pickup_second),
            Rarity::One => None,
        }
    }
}

fn check_chance(rarity: Rarity, chance: f64) -> Result<(), RateTableError> {
    if chance.is_finite() && chance >= 0.0 {
        Ok(())
    } else {
        Err(RateTableError::InvalidChance { rarity, chance })
    }
}

#[cfg(feature = "serde")]
mod wire {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    use super::{RarityBaseRate, RateTable, RateTableError};
    use crate::character::{CharacterId, Rarity};

    /// Rate config document as published by the data service:
    /// `{ base: { "1": {chance, char}, .. }, up: { "2": {chance}, "3": {chance} } }`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct RateConfig {
        pub base: BTreeMap<String, BaseRateEntry>,
        #[serde(default)]
        pub up: BTreeMap<String, PickupRateEntry>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BaseRateEntry {
        pub chance: f64,
        #[serde(rename = "char", default)]
        pub characters: Vec<CharacterId>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PickupRateEntry {
        pub chance: f64,
    }

    impl RateConfig {
        fn base_rate(&self, rarity: Rarity) -> Result<RarityBaseRate, RateTableError> {
            let entry = self
                .base
                .get(&rarity.to_string())
                .ok_or(RateTableError::MissingBaseRate(rarity))?;
            Ok(RarityBaseRate {
                rarity,
                chance: entry.chance,
                characters: entry.characters.clone(),
            })
        }

        fn up_chance(&self, rarity: Rarity) -> f64 {
            self.up
                .get(&rarity.to_string())
                .map(|entry| entry.chance)
                .unwrap_or(0.0)
        }
    }

    impl TryFrom<&RateConfig> for RateTable {
        type Error = RateTableError;

        fn try_from(config: &RateConfig) -> Result<Self, Self::Error> {
            RateTable::new(
                config.base_rate(Rarity::Three)?,
                config.base_rate(Rarity::Two)?,
                config.base_rate(Rarity::One)?,
                config.up_chance(Rarity::Three),
                config.up_chance(Rarity::Two),
            )
        }
    }
}

#[cfg(feature = "serde")]
pub use wire::{BaseRateEntry, PickupRateEntry, RateConfig};

#[cfg(test)]
mod tests {
    use super::*;

    fn base(rarity: Rarity, chance: f64, ids: &[u32]) -> RarityBaseRate {
        RarityBaseRate {
            rarity,
            chance,
            characters: ids.iter().copied().map(CharacterId).collect(),
        }
    }

    #[test]
    fn rejects_negative_chance() {
        let err = RateTable::new(
            base(Rarity::Three, 0.03, &[1]),
            base(Rarity::Two, -0.1, &[2]),
            base(Rarity::One, 0.785, &[3]),
            0.007,
            0.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RateTableError::InvalidChance {
                rarity: Rarity::Two,
                chance: -0.1
            }
        );
    }

    #[test]
    fn bottom_tier_has_no_pickup() {
        let table = RateTable::new(
            base(Rarity::Three, 0.03, &[1]),
            base(Rarity::Two, 0.185, &[2]),
            base(Rarity::One, 0.785, &[3]),
            0.007,
            0.03,
        )
        .unwrap();
        assert!(table.pickup(Rarity::One).is_none());
        assert_eq!(table.pickup(Rarity::Two).unwrap().chance, 0.03);
        assert_eq!(table.base(Rarity::One).characters, vec![CharacterId(3)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_wire_document() {
        let json = r#"{
            "base": {
                "1": {"chance": 0.785, "char": [10, 11]},
                "2": {"chance": 0.185, "char": [20]},
                "3": {"chance": 0.03, "char": [30, 31]}
            },
            "up": {"3": {"chance": 0.007}}
        }"#;
        let config: RateConfig = serde_json::from_str(json).unwrap();
        let table = RateTable::try_from(&config).unwrap();

        assert_eq!(table.base(Rarity::Three).characters.len(), 2);
        assert_eq!(table.pickup(Rarity::Three).unwrap().chance, 0.007);
        // missing "up.2" means no rate-up at rarity 2
        assert_eq!(table.pickup(Rarity::Two).unwrap().chance, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_base_tier_is_an_error() {
        let json = r#"{"base": {"1": {"chance": 1.0, "char": [1]}}}"#;
        let config: RateConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            RateTable::try_from(&config).unwrap_err(),
            RateTableError::MissingBaseRate(Rarity::Three)
        );
    }
}
