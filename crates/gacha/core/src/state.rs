//! Per-user collection state carried across draw batches.

use crate::character::CharacterId;

/// Collection state of one user.
///
/// The owning user id is the store key and is not repeated here. Field names
/// on the wire are `collected` and `total_count`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserGachaState {
    /// Characters obtained so far, in first-obtained order, without duplicates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub collected: Vec<CharacterId>,
    /// Consecutive pulls since the last top-rarity pickup.
    #[cfg_attr(feature = "serde", serde(rename = "total_count", default))]
    pub pulls_since_top_pickup: u32,
}

impl UserGachaState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_collected(&self, id: CharacterId) -> bool {
        self.collected.contains(&id)
    }

    /// Adds `id` to the collection. Returns true if it was not collected yet.
    pub fn collect(&mut self, id: CharacterId) -> bool {
        if self.has_collected(id) {
            return false;
        }
        self.collected.push(id);
        true
    }

    /// Applies the pity counter rule for one pull.
    pub fn record_pull(&mut self, is_top_pickup: bool) {
        if is_top_pickup {
            self.pulls_since_top_pickup = 0;
        } else {
            self.pulls_since_top_pickup = self.pulls_since_top_pickup.saturating_add(1);
        }
    }
}
