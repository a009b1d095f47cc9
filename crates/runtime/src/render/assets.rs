//! Card artwork bundle.

use std::fs;
use std::path::Path;

use ab_glyph::FontArc;
use image::RgbaImage;

use super::RenderError;
use super::raster;

/// Artwork used to build cards and the result sheet.
///
/// # Directory Layout
///
/// ```text
/// {assets}/
///   ├── gacha_bg.png          result sheet background
///   ├── gacha_card_bg.png     card frame
///   ├── gacha_card_mask.png   portrait mask (alpha channel)
///   ├── gacha_new.png         NEW badge
///   ├── gacha_pickup.png      pickup badge
///   ├── gacha_star.png        star icon
///   ├── gacha_stu_err.png     unknown-student portrait
///   └── gacha_font.ttf        bold face for the pity footer
/// ```
#[derive(Clone)]
pub struct CardAssets {
    pub background: RgbaImage,
    pub card_background: RgbaImage,
    pub card_mask: RgbaImage,
    pub new_badge: RgbaImage,
    pub pickup_badge: RgbaImage,
    pub star: RgbaImage,
    pub placeholder: RgbaImage,
    /// Bold face for the pity footer.
    pub font: FontArc,
}

impl CardAssets {
    pub const BACKGROUND: &'static str = "gacha_bg.png";
    pub const CARD_BACKGROUND: &'static str = "gacha_card_bg.png";
    pub const CARD_MASK: &'static str = "gacha_card_mask.png";
    pub const NEW_BADGE: &'static str = "gacha_new.png";
    pub const PICKUP_BADGE: &'static str = "gacha_pickup.png";
    pub const STAR: &'static str = "gacha_star.png";
    pub const PLACEHOLDER: &'static str = "gacha_stu_err.png";
    pub const FONT: &'static str = "gacha_font.ttf";

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        background: RgbaImage,
        card_background: RgbaImage,
        card_mask: RgbaImage,
        new_badge: RgbaImage,
        pickup_badge: RgbaImage,
        star: RgbaImage,
        placeholder: RgbaImage,
        font: FontArc,
    ) -> Self {
        Self {
            background,
            card_background,
            card_mask,
            new_badge,
            pickup_badge,
            star,
            placeholder,
            font,
        }
    }

    /// Loads every artwork file and the footer font from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let dir = dir.as_ref();
        let load = |name: &str| -> Result<RgbaImage, RenderError> {
            let path = dir.join(name);
            let bytes = fs::read(&path).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
            raster::decode(&bytes).map_err(|source| RenderError::Decode {
                asset: name.to_string(),
                source,
            })
        };

        let assets = Self::new(
            load(Self::BACKGROUND)?,
            load(Self::CARD_BACKGROUND)?,
            load(Self::CARD_MASK)?,
            load(Self::NEW_BADGE)?,
            load(Self::PICKUP_BADGE)?,
            load(Self::STAR)?,
            load(Self::PLACEHOLDER)?,
            Self::load_font(dir.join(Self::FONT))?,
        );
        tracing::debug!("Loaded card assets from {}", dir.display());

        Ok(assets)
    }

    /// Replaces the footer font, e.g. with a face covering more scripts.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = font;
        self
    }

    /// Loads a TrueType/OpenType font file for the footer.
    pub fn load_font(path: impl AsRef<Path>) -> Result<FontArc, RenderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        FontArc::try_from_vec(bytes).map_err(|_| RenderError::InvalidFont(path.to_path_buf()))
    }
}

impl std::fmt::Debug for CardAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardAssets")
            .field("background", &self.background.dimensions())
            .field("card", &self.card_background.dimensions())
            .field("mask", &self.card_mask.dimensions())
            .finish_non_exhaustive()
    }
}
