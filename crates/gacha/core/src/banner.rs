//! Banner definitions and active-banner resolution.

use std::collections::HashMap;

use crate::character::{CharacterId, CharacterRecord, Rarity};

/// Half-open activity window `[start, end)` in unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub const fn contains(&self, now: i64) -> bool {
        self.start <= now && now < self.end
    }
}

/// A time-bounded draw pool with rate-boosted pickup characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Banner {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub window: TimeWindow,
    #[cfg_attr(feature = "serde", serde(rename = "characters", default))]
    pub pickup: Vec<CharacterId>,
}

impl Banner {
    pub fn new(window: TimeWindow, pickup: impl IntoIterator<Item = CharacterId>) -> Self {
        Self {
            window,
            pickup: pickup.into_iter().collect(),
        }
    }

    pub fn is_active(&self, now: i64) -> bool {
        self.window.contains(now)
    }
}

/// Returns the first banner whose window contains `now`.
///
/// List order breaks ties when windows overlap.
pub fn find_current_banner(banners: &[Banner], now: i64) -> Option<&Banner> {
    banners.iter().find(|banner| banner.is_active(now))
}

/// Pickup characters of a banner split by rarity.
///
/// Pickup ids that are unknown to the character dictionary, or whose rarity
/// has no rate-up tier, are dropped here and stay reachable only through the
/// base pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickupPools {
    pub top: Vec<CharacterId>,
    pub second: Vec<CharacterId>,
}

impl PickupPools {
    pub fn split(banner: &Banner, characters: &HashMap<CharacterId, CharacterRecord>) -> Self {
        let mut pools = Self::default();
        for id in &banner.pickup {
            let Some(rarity) = characters.get(id).and_then(CharacterRecord::rarity) else {
                continue;
            };
            let pool = match rarity {
                Rarity::Three => &mut pools.top,
                Rarity::Two => &mut pools.second,
                Rarity::One => continue,
            };
            if !pool.contains(id) {
                pool.push(*id);
            }
        }
        pools
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.second.is_empty()
    }
}
