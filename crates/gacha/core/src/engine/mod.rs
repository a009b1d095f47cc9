//! Batch draw engine.
//!
//! [`DrawEngine`] computes the five weighted pools once per batch from a
//! [`RateTable`] and the banner's [`PickupPools`], then performs the pulls in
//! strict order against an injected RNG:
//!
//! 1. Pulls at guaranteed positions (every 10th by default) skip the bottom
//!    rarity pool.
//! 2. A pool is chosen proportionally to its chance, then a character is
//!    chosen uniformly from it.
//! 3. The user's collection and pity counter are updated after every pull, so
//!    a duplicate within the same batch is only "new" once.
mod pool;

pub use pool::{PoolKind, WeightedPool};

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::banner::PickupPools;
use crate::character::{CharacterId, Rarity};
use crate::config::DrawConfig;
use crate::rates::RateTable;
use crate::state::UserGachaState;

#[derive(Debug, Error, PartialEq)]
pub enum DrawError {
    #[error("no drawable pool for pull {position}")]
    NoEligiblePool { position: u32 },

    #[error("invalid pool weights for pull {position}: {reason}")]
    InvalidWeights { position: u32, reason: String },
}

/// Outcome of a single pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawResult {
    pub character: CharacterId,
    /// Pool the character was drawn from.
    pub pool: PoolKind,
    /// Not collected before this pull.
    pub is_new: bool,
    /// Pickup character of either rate-up tier.
    pub is_pickup: bool,
    /// Pickup character of the top tier.
    pub is_top_pickup: bool,
}

impl DrawResult {
    pub fn rarity(&self) -> Rarity {
        self.pool.rarity()
    }
}

/// Results of one batch together with the state to persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReport {
    pub results: Vec<DrawResult>,
    pub state: UserGachaState,
}

impl BatchReport {
    pub fn pity(&self) -> u32 {
        self.state.pulls_since_top_pickup
    }
}

/// Weighted draw engine for one banner context.
#[derive(Clone, Debug)]
pub struct DrawEngine {
    pools: [WeightedPool; 5],
    config: DrawConfig,
}

impl DrawEngine {
    pub fn new(rates: &RateTable, pickups: PickupPools, config: DrawConfig) -> Self {
        let pickup_chance = |rarity: Rarity, pool: &[CharacterId]| {
            if pool.is_empty() {
                0.0
            } else {
                rates.pickup(rarity).map(|rate| rate.chance).unwrap_or(0.0)
            }
        };
        let top_up = pickup_chance(Rarity::Three, pickups.top.as_slice());
        let second_up = pickup_chance(Rarity::Two, pickups.second.as_slice());

        let base = |rarity: Rarity, reserved: f64| {
            let rate = rates.base(rarity);
            ((rate.chance - reserved).max(0.0), rate.characters.clone())
        };
        let (top_chance, top_chars) = base(Rarity::Three, top_up);
        let (second_chance, second_chars) = base(Rarity::Two, second_up);
        let (bottom_chance, bottom_chars) = base(Rarity::One, 0.0);

        let pools = [
            WeightedPool::new(PoolKind::PickupTop, top_up, pickups.top),
            WeightedPool::new(PoolKind::PickupSecond, second_up, pickups.second),
            WeightedPool::new(PoolKind::BaseTop, top_chance, top_chars),
            WeightedPool::new(PoolKind::BaseSecond, second_chance, second_chars),
            WeightedPool::new(PoolKind::BaseBottom, bottom_chance, bottom_chars),
        ];

        Self { pools, config }
    }

    pub fn pools(&self) -> &[WeightedPool] {
        &self.pools
    }

    pub fn pool(&self, kind: PoolKind) -> &WeightedPool {
        &self.pools[kind.index()]
    }

    /// Probability mass assigned to a pool after pickup subtraction.
    pub fn effective_chance(&self, kind: PoolKind) -> f64 {
        self.pool(kind).chance
    }

    /// Draws one character for the pull at `position` (1-indexed).
    pub fn draw_one<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        position: u32,
    ) -> Result<(PoolKind, CharacterId), DrawError> {
        let guaranteed = self.config.is_guaranteed(position);
        let candidates: Vec<&WeightedPool> = self
            .pools
            .iter()
            .filter(|pool| !(guaranteed && pool.kind == PoolKind::BaseBottom))
            .filter(|pool| pool.is_drawable())
            .collect();

        if candidates.is_empty() {
            return Err(DrawError::NoEligiblePool { position });
        }

        let index = WeightedIndex::new(candidates.iter().map(|pool| pool.chance)).map_err(|e| {
            DrawError::InvalidWeights {
                position,
                reason: e.to_string(),
            }
        })?;
        let pool = candidates[index.sample(rng)];
        let character = pool
            .characters
            .choose(rng)
            .copied()
            .ok_or(DrawError::NoEligiblePool { position })?;

        Ok((pool.kind, character))
    }

    /// Performs `count` pulls in order, updating `state` after each one.
    pub fn draw_batch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut state: UserGachaState,
        count: u32,
    ) -> Result<BatchReport, DrawError> {
        let mut results = Vec::with_capacity(count as usize);

        for position in 1..=count {
            let (pool, character) = self.draw_one(rng, position)?;

            let is_top_pickup = self.pool(PoolKind::PickupTop).contains(character);
            let is_pickup =
                is_top_pickup || self.pool(PoolKind::PickupSecond).contains(character);
            let is_new = state.collect(character);
            state.record_pull(is_top_pickup);

            results.push(DrawResult {
                character,
                pool,
                is_new,
                is_pickup,
                is_top_pickup,
            });
        }

        Ok(BatchReport { results, state })
    }
}
