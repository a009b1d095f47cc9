//! Result sheet layout: cards in rows of five plus the pity footer.

use image::{Rgba, RgbaImage};

use super::assets::CardAssets;
use super::raster::{self, TextBox};

pub const CARDS_PER_ROW: usize = 5;
const GAP_X: i64 = 10;
const GAP_Y: i64 = 80;

const FOOTER_SIZE: f32 = 30.0;
const CAPTION: &str = "距上个3★UP";
const CAPTION_BOX: TextBox = TextBox::new(1678, 841, 1888, 885);
const CAPTION_FILL: Rgba<u8> = Rgba([36, 90, 126, 255]);
const PITY_BOX: TextBox = TextBox::new(1643, 885, 1890, 935);
const PITY_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Offset that centres `count` items of `size` separated by `gap` in `span`.
fn centred(span: u32, count: usize, size: u32, gap: i64) -> i64 {
    let occupied = count as i64 * (size as i64 + gap) - gap;
    (span as i64 - occupied) / 2
}

/// Pastes `cards` onto a copy of the background.
///
/// Rows hold at most [`CARDS_PER_ROW`] cards and are centred horizontally
/// one by one; the block of rows is centred vertically. All cards are
/// assumed to share the size of the first one.
pub fn compose_grid(assets: &CardAssets, cards: &[RgbaImage]) -> RgbaImage {
    let mut sheet = assets.background.clone();
    let Some(first) = cards.first() else {
        return sheet;
    };
    let (card_w, card_h) = first.dimensions();
    let (sheet_w, sheet_h) = sheet.dimensions();

    let rows: Vec<&[RgbaImage]> = cards.chunks(CARDS_PER_ROW).collect();
    let mut y = centred(sheet_h, rows.len(), card_h, GAP_Y);
    for row in rows {
        let mut x = centred(sheet_w, row.len(), card_w, GAP_X);
        for card in row {
            raster::paste(&mut sheet, card, x, y);
            x += card_w as i64 + GAP_X;
        }
        y += card_h as i64 + GAP_Y;
    }

    sheet
}

/// Writes the pity caption and counter in the bold footer face.
pub fn draw_footer(sheet: &mut RgbaImage, assets: &CardAssets, pity: u32) {
    let font = &assets.font;
    raster::draw_text_centered(sheet, font, FOOTER_SIZE, CAPTION_BOX, CAPTION, CAPTION_FILL);
    raster::draw_text_centered(
        sheet,
        font,
        FOOTER_SIZE,
        PITY_BOX,
        &pity.to_string(),
        PITY_FILL,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::card::tests::test_assets;

    const CARD: Rgba<u8> = Rgba([0, 128, 0, 255]);

    fn cards(count: usize) -> Vec<RgbaImage> {
        (0..count)
            .map(|_| RgbaImage::from_pixel(211, 240, CARD))
            .collect()
    }

    #[test]
    fn centred_matches_layout_arithmetic() {
        // (1920 - (5 * 221 - 10)) / 2
        assert_eq!(centred(1920, 5, 211, 10), 412);
        // (1080 - (2 * 320 - 80)) / 2
        assert_eq!(centred(1080, 2, 240, 80), 260);
        assert_eq!(centred(1080, 1, 240, 80), 420);
    }

    #[test]
    fn ten_cards_make_two_full_rows() {
        let assets = test_assets();
        let sheet = compose_grid(&assets, &cards(10));

        assert_eq!(sheet.dimensions(), (1920, 1080));
        // top-left card and bottom-right card
        assert_eq!(sheet.get_pixel(412, 260), &CARD);
        assert_eq!(sheet.get_pixel(412 + 4 * 221 + 210, 260 + 320 + 239), &CARD);
        // gap between first two cards
        assert_ne!(sheet.get_pixel(412 + 215, 260), &CARD);
        // below the block
        assert_ne!(sheet.get_pixel(412, 260 + 320 + 240), &CARD);
    }

    #[test]
    fn short_last_row_is_centred_on_its_own() {
        let assets = test_assets();
        let sheet = compose_grid(&assets, &cards(7));

        // second row holds two cards: (1920 - (2 * 221 - 10)) / 2 = 744
        let second_row_y = 260 + 320;
        assert_eq!(sheet.get_pixel(744, second_row_y), &CARD);
        assert_ne!(sheet.get_pixel(743, second_row_y), &CARD);
        assert_ne!(sheet.get_pixel(412, second_row_y), &CARD);
    }

    /// Pixels that differ between `a` and `b`, inside or outside `area`.
    fn changed(a: &RgbaImage, b: &RgbaImage, area: TextBox, margin: i32) -> (usize, usize) {
        let (mut inside, mut outside) = (0, 0);
        for (x, y, pixel) in a.enumerate_pixels() {
            if pixel == b.get_pixel(x, y) {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            let within = x >= area.left - margin
                && x < area.right + margin
                && y >= area.top - margin
                && y < area.bottom + margin;
            if within {
                inside += 1;
            } else {
                outside += 1;
            }
        }
        (inside, outside)
    }

    #[test]
    fn footer_draws_caption_and_pity_inside_their_boxes() {
        let assets = test_assets();
        let blank = assets.background.clone();
        let mut sheet = blank.clone();
        draw_footer(&mut sheet, &assets, 17);

        let union = TextBox::new(PITY_BOX.left, CAPTION_BOX.top, PITY_BOX.right, PITY_BOX.bottom);
        let (inside, outside) = changed(&sheet, &blank, union, 4);
        assert_eq!(outside, 0);

        let (caption, _) = changed(&sheet, &blank, CAPTION_BOX, 0);
        let (counter, _) = changed(&sheet, &blank, PITY_BOX, 0);
        assert!(caption > 0);
        assert!(counter > 0);
        assert!(inside >= caption + counter);
    }

    #[test]
    fn footer_counter_follows_pity_value() {
        let assets = test_assets();
        let mut zero = assets.background.clone();
        let mut many = assets.background.clone();
        draw_footer(&mut zero, &assets, 0);
        draw_footer(&mut many, &assets, 999);

        assert!(changed(&zero, &many, PITY_BOX, 0).0 > 0);
        // caption box sits above the counter box, so only the counter differs
        let above_counter = TextBox::new(CAPTION_BOX.left, CAPTION_BOX.top, CAPTION_BOX.right, PITY_BOX.top - 4);
        assert_eq!(changed(&zero, &many, above_counter, 0).0, 0);
    }

    #[test]
    fn footer_text_is_tinted_by_its_fill() {
        let assets = test_assets();
        let mut sheet = assets.background.clone();
        draw_footer(&mut sheet, &assets, 8);

        let any_pixel = |area: TextBox, tinted: &dyn Fn(&Rgba<u8>) -> bool| {
            (area.left..area.right)
                .any(|x| (area.top..area.bottom).any(|y| tinted(sheet.get_pixel(x as u32, y as u32))))
        };
        // background is grey (30, 30, 30): blue text pulls blue above red, white lifts all channels
        assert!(any_pixel(CAPTION_BOX, &|p| p[2] > p[0] + 20));
        assert!(any_pixel(PITY_BOX, &|p| p[0] > 100 && p[0] == p[1] && p[1] == p[2]));
    }
}
