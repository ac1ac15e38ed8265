//! Embedded 5x7 bitmap font for heatmap labels.
//!
//! Only the glyphs the heatmap prints are included: digits, `%`, `-`, `.`,
//! space and the letters of the title and legend caption. Anything else
//! renders as blank space.

use image::{Rgb, RgbImage};

/// Advance per character at scale 1 (5 px glyph + 1 px spacing).
pub const CHAR_W: u32 = 6;
/// Glyph height at scale 1.
pub const CHAR_H: u32 = 7;

/// Rows top to bottom; the low 5 bits of each row are pixels, MSB on the left.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        'g' => [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x0E],
        'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
        'k' => [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12],
        'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        'p' => [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
        'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
        's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        'w' => [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A],
        'y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        _ => return None,
    };
    Some(rows)
}

/// Pixel width of `text` at `scale`, without trailing spacing. Saturates
/// instead of overflowing for huge scales.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u64;
    if n == 0 {
        return 0;
    }
    let w = (n * CHAR_W as u64 - 1) * scale as u64;
    w.min(u32::MAX as u64) as u32
}

pub fn text_height(scale: u32) -> u32 {
    CHAR_H.saturating_mul(scale)
}

/// Fill the `s` x `s` block at (`x`, `y`), clipped to the image.
fn fill_block(img: &mut RgbImage, x: i64, y: i64, s: i64, color: Rgb<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (x0, x1) = (x.max(0), (x + s).min(w));
    let (y0, y1) = (y.max(0), (y + s).min(h));
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px as u32, py as u32, color);
        }
    }
}

fn draw_char(img: &mut RgbImage, x: i64, y: i64, ch: char, scale: u32, color: Rgb<u8>) {
    let Some(rows) = glyph(ch) else { return };
    let s = scale as i64;
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..5i64 {
            if bits & (0x10 >> col) != 0 {
                fill_block(img, x + col * s, y + row as i64 * s, s, color);
            }
        }
    }
}

/// Draw `text` with its top-left corner at (`x`, `y`). Pixels falling outside
/// the image are clipped.
pub fn draw_text(img: &mut RgbImage, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = CHAR_W as i64 * scale as i64;
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i64 * advance;
        if cx >= img.width() as i64 {
            break;
        }
        draw_char(img, cx, y, ch, scale, color);
    }
}

/// Draw `text` centred on (`cx`, `cy`).
pub fn draw_text_centered(
    img: &mut RgbImage,
    cx: i64,
    cy: i64,
    text: &str,
    scale: u32,
    color: Rgb<u8>,
) {
    let w = text_width(text, scale) as i64;
    let h = text_height(scale) as i64;
    draw_text(img, cx - w / 2, cy - h / 2, text, scale, color);
}
