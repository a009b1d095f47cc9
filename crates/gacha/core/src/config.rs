/// Draw tuning parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawConfig {
    /// Every pull whose 1-indexed batch position is a multiple of this value
    /// excludes the bottom rarity pool.
    pub guarantee_interval: u32,
}

impl DrawConfig {
    pub const DEFAULT_GUARANTEE_INTERVAL: u32 = 10;

    pub fn new() -> Self {
        Self {
            guarantee_interval: Self::DEFAULT_GUARANTEE_INTERVAL,
        }
    }

    pub fn with_guarantee_interval(guarantee_interval: u32) -> Self {
        Self {
            guarantee_interval: guarantee_interval.max(1),
        }
    }

    /// Returns true if the pull at `position` (1-indexed) must skip the
    /// bottom rarity pool.
    pub fn is_guaranteed(&self, position: u32) -> bool {
        position > 0 && position % self.guarantee_interval.max(1) == 0
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::new()
    }
}
