//! Thin raster helpers over `image` / `imageproc`.

use std::io::Cursor;

use ab_glyph::{FontArc, PxScale};
use image::imageops::{self, FilterType};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

/// Axis-aligned box given by its top-left and bottom-right corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Decodes any supported format (PNG, WebP, ...) into RGBA.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Scales `image` to cover `width` x `height` keeping its aspect ratio, then
/// crops the overflow evenly from both sides.
pub fn resize_cover(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    let scale = f64::max(
        width as f64 / src_w as f64,
        height as f64 / src_h as f64,
    );
    let scaled_w = ((src_w as f64 * scale).ceil() as u32).max(width);
    let scaled_h = ((src_h as f64 * scale).ceil() as u32).max(height);

    let scaled = imageops::resize(image, scaled_w, scaled_h, FilterType::Lanczos3);
    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    imageops::crop_imm(&scaled, x, y, width, height).to_image()
}

/// Multiplies the alpha channel of `image` by the alpha channel of `mask`.
///
/// Pixels outside the mask become fully transparent.
pub fn apply_mask(image: &mut RgbaImage, mask: &RgbaImage) {
    let (mask_w, mask_h) = mask.dimensions();
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let coverage = if x < mask_w && y < mask_h {
            mask.get_pixel(x, y)[3] as u16
        } else {
            0
        };
        pixel[3] = ((pixel[3] as u16 * coverage) / 255) as u8;
    }
}

/// Alpha-blends `top` onto `bottom` at `(x, y)`; negative offsets clip.
pub fn paste(bottom: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(bottom, top, x, y);
}

/// Draws `text` centred inside `area`.
pub fn draw_text_centered(
    canvas: &mut RgbaImage,
    font: &FontArc,
    size: f32,
    area: TextBox,
    text: &str,
    color: Rgba<u8>,
) {
    let scale = PxScale::from(size);
    let (text_w, text_h) = text_size(scale, font, text);
    let x = area.left + (area.width() - text_w as i32) / 2;
    let y = area.top + (area.height() - text_h as i32) / 2;
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn resize_cover_fills_target() {
        let wide = solid(400, 100, [10, 20, 30, 255]);
        let out = resize_cover(&wide, 50, 60);
        assert_eq!(out.dimensions(), (50, 60));
        assert_eq!(out.get_pixel(0, 0)[3], 255);
        assert_eq!(out.get_pixel(49, 59)[3], 255);
    }

    #[test]
    fn resize_cover_handles_empty_source() {
        let out = resize_cover(&RgbaImage::new(0, 0), 8, 8);
        assert_eq!(out.dimensions(), (8, 8));
    }

    #[test]
    fn mask_alpha_is_multiplied() {
        let mut image = solid(2, 1, [255, 0, 0, 255]);
        let mut mask = solid(2, 1, [0, 0, 0, 255]);
        mask.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        apply_mask(&mut image, &mask);
        assert_eq!(image.get_pixel(0, 0)[3], 255);
        assert_eq!(image.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn paste_clips_negative_offsets() {
        let mut bottom = solid(4, 4, [0, 0, 0, 255]);
        let top = solid(2, 2, [255, 255, 255, 255]);
        paste(&mut bottom, &top, -1, -1);

        assert_eq!(bottom.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(bottom.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn png_output_decodes_back() {
        let image = solid(3, 2, [1, 2, 3, 255]);
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        assert_eq!(decode(&bytes).unwrap(), image);
    }
}
