//! Character identity and rarity tiers.

use std::fmt;

/// Stable numeric identifier of a drawable character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CharacterId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Rarity tier of a character, shown as a star count on cards.
///
/// The string form matches the keys used by the rate config (`"1"`, `"2"`,
/// `"3"`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
pub enum Rarity {
    #[strum(serialize = "1")]
    One = 1,
    #[strum(serialize = "2")]
    Two = 2,
    #[strum(serialize = "3")]
    Three = 3,
}

impl Rarity {
    /// Converts a star grade into a rarity tier.
    pub const fn from_stars(stars: u8) -> Option<Self> {
        match stars {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    pub const fn stars(self) -> u8 {
        self as u8
    }
}

/// Character data consumed from the external game-data service.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    #[cfg_attr(feature = "serde", serde(rename = "Id"))]
    pub id: CharacterId,
    /// Star grade as published by the data service.
    #[cfg_attr(feature = "serde", serde(rename = "StarGrade"))]
    pub star_grade: u8,
    /// Internal asset name used to build portrait paths.
    #[cfg_attr(feature = "serde", serde(rename = "DevName"))]
    pub dev_name: String,
}

impl CharacterRecord {
    pub fn new(id: CharacterId, star_grade: u8, dev_name: impl Into<String>) -> Self {
        Self {
            id,
            star_grade,
            dev_name: dev_name.into(),
        }
    }

    pub fn rarity(&self) -> Option<Rarity> {
        Rarity::from_stars(self.star_grade)
    }

    /// Asset key of the collection portrait for this character.
    pub fn portrait_path(&self) -> String {
        format!(
            "images/student/collection/Student_Portrait_{}_Collection.webp",
            self.dev_name
        )
    }
}
