//! Weighted character pools used by the draw engine.

use crate::character::{CharacterId, Rarity};

/// The five pools a pull can land in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PoolKind {
    PickupTop,
    PickupSecond,
    BaseTop,
    BaseSecond,
    BaseBottom,
}

impl PoolKind {
    /// Pools in the order they are offered to the weighted choice.
    pub const ALL: [PoolKind; 5] = [
        PoolKind::PickupTop,
        PoolKind::PickupSecond,
        PoolKind::BaseTop,
        PoolKind::BaseSecond,
        PoolKind::BaseBottom,
    ];

    /// Position of this kind in [`PoolKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn rarity(self) -> Rarity {
        match self {
            PoolKind::PickupTop | PoolKind::BaseTop => Rarity::Three,
            PoolKind::PickupSecond | PoolKind::BaseSecond => Rarity::Two,
            PoolKind::BaseBottom => Rarity::One,
        }
    }
}

/// A set of characters and the probability mass of landing in it.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedPool {
    pub kind: PoolKind,
    pub chance: f64,
    pub characters: Vec<CharacterId>,
}

impl WeightedPool {
    pub fn new(kind: PoolKind, chance: f64, characters: Vec<CharacterId>) -> Self {
        Self {
            kind,
            chance,
            characters,
        }
    }

    /// A pool takes part in a weighted choice only if it can yield a character.
    pub fn is_drawable(&self) -> bool {
        !self.characters.is_empty() && self.chance > 0.0
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.contains(&id)
    }
}
