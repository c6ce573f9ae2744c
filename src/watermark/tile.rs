//! Standalone watermark overlay.
//!
//! Renders the watermark on its own transparent canvas instead of onto a
//! photo: a translucent black background with the text centred on it. The
//! result is meant to be laid over other media (for example video frames) by
//! an external tool.

use super::compositor::fill_plate;
use super::position::{PlacementPosition, PlateDimensions};
use super::text_renderer::{draw_text, measure_text, WatermarkFont};
use super::WatermarkError;
use image::{Rgba, RgbaImage};

/// Space around the text on every side of the overlay canvas.
pub const OVERLAY_PADDING: f32 = 20.0;

/// Background alpha of the overlay.
pub const OVERLAY_BACKGROUND_ALPHA: u8 = 100;

/// Text alpha of the overlay.
pub const OVERLAY_TEXT_ALPHA: u8 = 180;

/// Render `text` onto a new transparent canvas sized to the text plus
/// [`OVERLAY_PADDING`].
pub fn render_overlay(
    font: &WatermarkFont,
    text: &str,
    text_size: f32,
) -> Result<RgbaImage, WatermarkError> {
    if text.trim().is_empty() {
        return Err(WatermarkError::RenderError("overlay text is empty".to_string()));
    }
    if !text_size.is_finite() || text_size <= 0.0 {
        return Err(WatermarkError::ConfigError(format!(
            "overlay text_size must be positive, got {}",
            text_size
        )));
    }

    let metrics = measure_text(font, text, text_size);
    let width = (metrics.width + OVERLAY_PADDING * 2.0) as u32;
    let height = (metrics.height + OVERLAY_PADDING * 2.0) as u32;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    fill_plate(
        &mut canvas,
        PlacementPosition::new(0, 0),
        &PlateDimensions { width, height },
        Rgba([0, 0, 0, OVERLAY_BACKGROUND_ALPHA]),
    );

    // Vertically centre the line box: descent is negative in ab_glyph
    let descent = metrics.ascent - metrics.height;
    let baseline = height as f32 / 2.0 + (metrics.ascent + descent) / 2.0;
    let origin_x = width as f32 / 2.0 - metrics.width / 2.0;

    draw_text(
        &mut canvas,
        font,
        text,
        text_size,
        origin_x,
        baseline,
        Rgba([255, 255, 255, OVERLAY_TEXT_ALPHA]),
    );

    Ok(canvas)
}
