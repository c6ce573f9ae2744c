//! Text measuring and glyph rasterization.
//!
//! Glyphs are rasterized with `ab_glyph` and blended straight onto the
//! target canvas using their coverage as an extra opacity factor, which gives
//! anti-aliased edges without an intermediate text bitmap.
//!
//! A copy of DejaVu Sans is embedded so rendering never depends on fonts
//! installed on the host. A different TrueType/OpenType file can be loaded
//! with [`WatermarkFont::from_file`].

use super::compositor::blend_pixels;
use super::WatermarkError;
use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Embedded font data (DejaVu Sans, see fonts/LICENSE-DejaVu.txt).
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

/// A parsed font, cheap to clone and shareable across threads.
#[derive(Clone, Debug)]
pub struct WatermarkFont {
    font: FontArc,
}

impl WatermarkFont {
    /// The embedded default font.
    pub fn embedded() -> Result<Self, WatermarkError> {
        let font = FontArc::try_from_slice(EMBEDDED_FONT_DATA)
            .map_err(|e| WatermarkError::FontError(format!("embedded font: {}", e)))?;
        Ok(Self { font })
    }

    /// Load a font from raw TrueType/OpenType bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, WatermarkError> {
        let font = FontArc::try_from_vec(data).map_err(|e| WatermarkError::FontError(e.to_string()))?;
        Ok(Self { font })
    }

    /// Load a font file from disk.
    pub fn from_file(path: &Path) -> Result<Self, WatermarkError> {
        let data = std::fs::read(path).map_err(|e| {
            WatermarkError::FontError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data)
    }

    /// Load `path` if given, otherwise fall back to the embedded font.
    pub fn load(path: Option<&Path>) -> Result<Self, WatermarkError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }
}

/// Measured extent of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width including kerning.
    pub width: f32,
    /// Line height (ascent - descent).
    pub height: f32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
}

/// Measure a line of text at `text_size` pixels.
pub fn measure_text(font: &WatermarkFont, text: &str, text_size: f32) -> TextMetrics {
    let scaled_font = font.font.as_scaled(PxScale::from(text_size));

    let mut width = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }

        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    TextMetrics {
        width,
        height: scaled_font.height(),
        ascent: scaled_font.ascent(),
    }
}

/// Draw a line of text onto `target` with its left edge at `origin_x` and
/// its baseline at `baseline`.
///
/// The alpha channel of `paint` is scaled by each pixel's glyph coverage.
/// Pixels that fall outside the canvas are dropped.
pub fn draw_text(
    target: &mut RgbaImage,
    font: &WatermarkFont,
    text: &str,
    text_size: f32,
    origin_x: f32,
    baseline: f32,
    paint: Rgba<u8>,
) {
    let scale = PxScale::from(text_size);
    let scaled_font = font.font.as_scaled(scale);
    let canvas_width = target.width() as i32;
    let canvas_height = target.height() as i32;

    let mut cursor_x = origin_x;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline));

        if let Some(outlined) = font.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && x < canvas_width && y < canvas_height {
                    let existing = *target.get_pixel(x as u32, y as u32);
                    let blended = blend_pixels(existing, paint, coverage);
                    target.put_pixel(x as u32, y as u32, blended);
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}
