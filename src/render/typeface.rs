// File: src/render/typeface.rs
use ab_glyph::{FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::Path;

const BITMAP_CELL: u32 = 8;

/// The face text is drawn with.
pub enum Typeface {
    /// A font file loaded from disk
    TrueType(FontVec),
    /// The built-in 8x8 bitmap glyphs, scaled by whole pixels
    Bitmap,
}

impl Typeface {
    /// Loads the font at `path`, falling back to the bitmap face when no
    /// path is given or the file cannot be used.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Typeface::Bitmap;
        };
        let loaded = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| FontVec::try_from_vec(bytes).map_err(|e| e.to_string()));
        match loaded {
            Ok(font) => {
                tracing::debug!(font = %path.display(), "loaded font");
                Typeface::TrueType(font)
            }
            Err(e) => {
                tracing::warn!(font = %path.display(), "cannot use font ({}), using bitmap glyphs", e);
                Typeface::Bitmap
            }
        }
    }

    /// Width and height in pixels of `text` at `size_px`.
    pub fn measure(&self, text: &str, size_px: f32) -> (u32, u32) {
        match self {
            Typeface::TrueType(font) => text_size(PxScale::from(size_px), font, text),
            Typeface::Bitmap => {
                let cell = BITMAP_CELL.saturating_mul(bitmap_scale(size_px));
                let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
                (chars.saturating_mul(cell), if chars == 0 { 0 } else { cell })
            }
        }
    }

    /// Draws `text` centered on `center`. Pixels outside the canvas are clipped.
    pub fn draw_centered(&self, canvas: &mut RgbImage, text: &str, center: (f32, f32), size_px: f32, color: Rgb<u8>) {
        if text.is_empty() {
            return;
        }
        let (w, h) = self.measure(text, size_px);
        let x = (center.0 - w as f32 / 2.0).round() as i32;
        let y = (center.1 - h as f32 / 2.0).round() as i32;
        match self {
            Typeface::TrueType(font) => draw_text_mut(canvas, color, x, y, PxScale::from(size_px), font, text),
            Typeface::Bitmap => draw_bitmap_text(canvas, text, x, y, bitmap_scale(size_px), color),
        }
    }
}

fn bitmap_scale(size_px: f32) -> u32 {
    ((size_px / BITMAP_CELL as f32).round() as u32).max(1)
}

fn draw_bitmap_text(canvas: &mut RgbImage, text: &str, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let (width, height) = (i64::from(width), i64::from(height));
    let scale_px = i64::from(scale);
    let step = i64::from(BITMAP_CELL) * scale_px;
    for (i, c) in text.chars().enumerate() {
        let origin_x = i64::from(x).saturating_add((i as i64).saturating_mul(step));
        if origin_x >= width {
            break;
        }
        if origin_x.saturating_add(step) <= 0 {
            continue;
        }
        let glyph = BASIC_FONTS.get(c).or_else(|| BASIC_FONTS.get('?')).unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            let py = i64::from(y).saturating_add(row as i64 * scale_px);
            if py >= height || py.saturating_add(scale_px) <= 0 {
                continue;
            }
            for col in 0..BITMAP_CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x.saturating_add(i64::from(col) * scale_px);
                if px >= width || px.saturating_add(scale_px) <= 0 {
                    continue;
                }
                // Clip the cell to the canvas so the rect fits in i32.
                let (x0, y0) = (px.max(0), py.max(0));
                let x1 = px.saturating_add(scale_px).min(width);
                let y1 = py.saturating_add(scale_px).min(height);
                let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
                draw_filled_rect_mut(canvas, rect, color);
            }
        }
    }
}
