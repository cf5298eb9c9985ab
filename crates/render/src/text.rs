//! Bitmap text rasterization on top of the 8x8 glyph set.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Edge length of one unscaled glyph cell, in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Integer magnification for a requested point size.
pub fn glyph_scale(font_size: f64) -> u32 {
    (font_size / GLYPH_SIZE as f64).round().max(1.0) as u32
}

/// Maps full-width forms onto their ASCII counterparts so they hit a glyph.
///
/// Covers U+FF01..=U+FF5E plus the ideographic space; everything else is
/// returned untouched and falls back to `?` at lookup time if no glyph
/// exists.
pub fn fold_fullwidth(ch: char) -> char {
    match ch {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
        other => other,
    }
}

/// Pixel width of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Blits `text` with its top-left corner at `(x, y)`, clipping at the image
/// bounds. Coordinates may be negative when the text is wider than the
/// target.
pub fn draw_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let scale_i = scale.max(1) as i32;
    let mut cursor_x = x;
    for ch in text.chars() {
        let folded = fold_fullwidth(ch);
        let glyph = BASIC_FONTS
            .get(folded)
            .or_else(|| BASIC_FONTS.get('?'));
        let Some(glyph) = glyph else {
            cursor_x += GLYPH_SIZE as i32 * scale_i;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col_idx in 0..GLYPH_SIZE as i32 {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale_i;
                let py = y + row_idx as i32 * scale_i;
                for sy in 0..scale_i {
                    for sx in 0..scale_i {
                        let tx = px + sx;
                        let ty = py + sy;
                        if tx >= 0
                            && ty >= 0
                            && tx < img.width() as i32
                            && ty < img.height() as i32
                        {
                            img.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_SIZE as i32 * scale_i;
    }
}
