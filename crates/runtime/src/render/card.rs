//! Single-card layout.

use image::RgbaImage;

use super::assets::CardAssets;
use super::raster;

const PORTRAIT_ORIGIN: (i64, i64) = (26, 13);
const STAR_LEFT: i64 = 26;
const STAR_SPAN: i64 = 159;
const STAR_TOP: i64 = 198;
const STAR_STEP: i64 = 30;
const NEW_BADGE_ORIGIN: (i64, i64) = (45, 2);
const PICKUP_BADGE_ORIGIN: (i64, i64) = (41, -2);
const PICKUP_BADGE_BELOW_NEW: (i64, i64) = (39, 27);

/// Portrait and star count of a resolved character.
pub struct Portrait {
    pub image: RgbaImage,
    pub stars: u8,
}

/// Badges drawn on top of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardBadges {
    pub is_new: bool,
    pub is_pickup: bool,
}

/// A finished card.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    pub image: RgbaImage,
    pub stars: u8,
    /// Drawn with the unknown-student portrait.
    pub placeholder: bool,
}

/// Builds one card. `None` uses the placeholder portrait with no stars.
pub fn compose_card(
    assets: &CardAssets,
    portrait: Option<Portrait>,
    badges: CardBadges,
) -> RenderedCard {
    let placeholder = portrait.is_none();
    let (source, stars) = match portrait {
        Some(portrait) => (portrait.image, portrait.stars),
        None => (assets.placeholder.clone(), 0),
    };

    let (mask_w, mask_h) = assets.card_mask.dimensions();
    let mut framed = raster::resize_cover(&source, mask_w, mask_h);
    raster::apply_mask(&mut framed, &assets.card_mask);

    let mut card = assets.card_background.clone();
    raster::paste(&mut card, &framed, PORTRAIT_ORIGIN.0, PORTRAIT_ORIGIN.1);

    let first_star = STAR_LEFT + (STAR_SPAN - STAR_STEP * stars as i64) / 2;
    for i in 0..stars as i64 {
        raster::paste(&mut card, &assets.star, first_star + i * STAR_STEP, STAR_TOP);
    }

    if badges.is_new {
        raster::paste(
            &mut card,
            &assets.new_badge,
            NEW_BADGE_ORIGIN.0,
            NEW_BADGE_ORIGIN.1,
        );
    }
    if badges.is_pickup {
        let (x, y) = if badges.is_new {
            PICKUP_BADGE_BELOW_NEW
        } else {
            PICKUP_BADGE_ORIGIN
        };
        raster::paste(&mut card, &assets.pickup_badge, x, y);
    }

    RenderedCard {
        image: card,
        stars,
        placeholder,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use ab_glyph::FontArc;
    use image::Rgba;

    use super::*;

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    pub(crate) const FRAME: Rgba<u8> = Rgba([200, 200, 200, 255]);
    pub(crate) const STAR: Rgba<u8> = Rgba([255, 215, 0, 255]);
    const NEW: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const PICKUP: Rgba<u8> = Rgba([0, 0, 255, 255]);
    pub(crate) const MISSING: Rgba<u8> = Rgba([90, 90, 90, 255]);

    pub(crate) const FOOTER_FONT: &[u8] =
        include_bytes!("../../tests/fixtures/DejaVuSans-Bold.ttf");

    /// Artwork sized like the real files, filled with marker colours.
    pub(crate) fn test_assets() -> CardAssets {
        CardAssets::new(
            RgbaImage::from_pixel(1920, 1080, Rgba([30, 30, 30, 255])),
            RgbaImage::from_pixel(211, 240, FRAME),
            RgbaImage::from_pixel(159, 180, Rgba([255, 255, 255, 255])),
            RgbaImage::from_pixel(8, 8, NEW),
            RgbaImage::from_pixel(8, 8, PICKUP),
            RgbaImage::from_pixel(10, 10, STAR),
            RgbaImage::from_pixel(16, 16, MISSING),
            FontArc::try_from_slice(FOOTER_FONT).unwrap(),
        )
    }

    fn portrait(stars: u8) -> Portrait {
        Portrait {
            image: RgbaImage::from_pixel(64, 64, Rgba([0, 255, 0, 255])),
            stars,
        }
    }

    #[test]
    fn portrait_is_masked_into_frame() {
        let assets = test_assets();
        let card = compose_card(&assets, Some(portrait(3)), CardBadges::default());

        assert_eq!(card.image.dimensions(), (211, 240));
        assert_eq!(card.image.get_pixel(100, 100), &Rgba([0, 255, 0, 255]));
        assert_eq!(card.image.get_pixel(5, 5), &FRAME);
        assert!(!card.placeholder);
    }

    #[test]
    fn stars_are_centred_under_portrait() {
        let assets = test_assets();
        let card = compose_card(&assets, Some(portrait(3)), CardBadges::default());

        // 26 + (159 - 90) / 2 = 60
        assert_eq!(card.image.get_pixel(60, 198), &STAR);
        assert_eq!(card.image.get_pixel(120, 198), &STAR);
        assert_ne!(card.image.get_pixel(150, 198), &STAR);
        assert_eq!(card.stars, 3);
    }

    #[test]
    fn placeholder_has_no_stars() {
        let assets = test_assets();
        let card = compose_card(&assets, None, CardBadges::default());

        assert!(card.placeholder);
        assert_eq!(card.stars, 0);
        assert_eq!(card.image.get_pixel(100, 100), &MISSING);
        assert_ne!(card.image.get_pixel(98, 198), &STAR);
    }

    #[test]
    fn pickup_badge_moves_below_new_badge() {
        let assets = test_assets();
        let alone = compose_card(
            &assets,
            Some(portrait(2)),
            CardBadges {
                is_new: false,
                is_pickup: true,
            },
        );
        assert_eq!(alone.image.get_pixel(41, 0), &PICKUP);

        let both = compose_card(
            &assets,
            Some(portrait(2)),
            CardBadges {
                is_new: true,
                is_pickup: true,
            },
        );
        assert_eq!(both.image.get_pixel(45, 2), &NEW);
        assert_eq!(both.image.get_pixel(39, 27), &PICKUP);
        assert_ne!(both.image.get_pixel(41, 0), &PICKUP);
    }

    #[test]
    fn transparent_mask_hides_portrait() {
        let mut assets = test_assets();
        assets.card_mask = RgbaImage::from_pixel(159, 180, CLEAR);
        let card = compose_card(&assets, Some(portrait(1)), CardBadges::default());
        assert_eq!(card.image.get_pixel(100, 100), &FRAME);
    }
}
