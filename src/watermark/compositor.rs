//! Watermark compositor.
//!
//! Draws a translucent black plate sized to the measured text, then the text
//! itself in white on top of it. Both share the alpha derived from the
//! settings' opacity and are blended with the Porter-Duff "over" operator.
//! Anything that falls outside the image is clipped.
//!
//! The source image is never touched: the compositor works on an RGBA copy
//! and returns it.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use watermarking::watermark::{Compositor, WatermarkSettings};
//!
//! let compositor = Compositor::with_embedded_font().unwrap();
//! let photo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 480, Rgba([200, 200, 200, 255])));
//! let settings = WatermarkSettings::default().with_text("(c) Studio").with_text_size(40.0);
//!
//! let stamped = compositor.compose(&photo, &settings).unwrap();
//! assert_eq!((stamped.width(), stamped.height()), (640, 480));
//! ```

use super::position::{is_visible, layout_text, ImageDimensions, PlacementPosition, PlateDimensions, PlateLayout};
use super::text_renderer::{draw_text, measure_text, WatermarkFont};
use super::{WatermarkError, WatermarkSettings};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

/// Plate color before the settings' alpha is applied.
const PLATE_RGB: [u8; 3] = [0, 0, 0];

/// Text color before the settings' alpha is applied.
const TEXT_RGB: [u8; 3] = [255, 255, 255];

/// Stamps text watermarks with a fixed font.
#[derive(Debug, Clone)]
pub struct Compositor {
    font: WatermarkFont,
}

impl Compositor {
    pub fn new(font: WatermarkFont) -> Self {
        Self { font }
    }

    /// Compositor using the embedded default font.
    pub fn with_embedded_font() -> Result<Self, WatermarkError> {
        Ok(Self::new(WatermarkFont::embedded()?))
    }

    pub fn font(&self) -> &WatermarkFont {
        &self.font
    }

    /// Compute where the plate and text would land on an image of the given
    /// size without drawing anything.
    pub fn layout(&self, image: ImageDimensions, settings: &WatermarkSettings) -> PlateLayout {
        let metrics = measure_text(&self.font, &settings.text, settings.text_size);
        layout_text(
            settings.position,
            &image,
            metrics.width,
            metrics.height,
            metrics.ascent,
        )
    }

    /// Return a watermarked copy of `image`.
    ///
    /// The result is always RGBA with the same dimensions as the input. Blank
    /// text yields an unmodified copy.
    pub fn compose(
        &self,
        image: &DynamicImage,
        settings: &WatermarkSettings,
    ) -> Result<DynamicImage, WatermarkError> {
        settings.validate().map_err(WatermarkError::ConfigError)?;

        if settings.is_blank() {
            debug!("Watermark text is blank, returning unmodified copy");
            return Ok(DynamicImage::ImageRgba8(image.to_rgba8()));
        }

        let stamped = self.compose_rgba(&image.to_rgba8(), settings)?;
        Ok(DynamicImage::ImageRgba8(stamped))
    }

    /// Same as [`Compositor::compose`] for an RGBA buffer.
    pub fn compose_rgba(
        &self,
        image: &RgbaImage,
        settings: &WatermarkSettings,
    ) -> Result<RgbaImage, WatermarkError> {
        settings.validate().map_err(WatermarkError::ConfigError)?;

        let mut output = image.clone();
        if settings.is_blank() {
            return Ok(output);
        }

        let dims = ImageDimensions {
            width: output.width(),
            height: output.height(),
        };
        let metrics = measure_text(&self.font, &settings.text, settings.text_size);
        let layout = layout_text(
            settings.position,
            &dims,
            metrics.width,
            metrics.height,
            metrics.ascent,
        );

        if !is_visible(&layout.placement, &dims, &layout.plate) {
            debug!(
                width = dims.width,
                height = dims.height,
                position = %settings.position,
                "Watermark plate lies outside the image, nothing to draw"
            );
            return Ok(output);
        }

        debug!(
            width = dims.width,
            height = dims.height,
            position = %settings.position,
            plate_x = layout.placement.x,
            plate_y = layout.placement.y,
            plate_width = layout.plate.width,
            plate_height = layout.plate.height,
            "Compositing watermark"
        );

        let alpha = settings.alpha();
        fill_plate(
            &mut output,
            layout.placement,
            &layout.plate,
            Rgba([PLATE_RGB[0], PLATE_RGB[1], PLATE_RGB[2], alpha]),
        );
        draw_text(
            &mut output,
            &self.font,
            &settings.text,
            settings.text_size,
            layout.anchor.origin_x(metrics.width),
            layout.anchor.baseline,
            Rgba([TEXT_RGB[0], TEXT_RGB[1], TEXT_RGB[2], alpha]),
        );

        Ok(output)
    }
}

/// Watermark `image` with `font` in one call.
pub fn apply_watermark(
    image: &DynamicImage,
    settings: &WatermarkSettings,
    font: &WatermarkFont,
) -> Result<DynamicImage, WatermarkError> {
    Compositor::new(font.clone()).compose(image, settings)
}

/// Blend a solid rectangle onto the target, clipped to the target bounds.
pub(crate) fn fill_plate(
    target: &mut RgbaImage,
    position: PlacementPosition,
    plate: &PlateDimensions,
    paint: Rgba<u8>,
) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let x_start = position.x.max(0);
    let y_start = position.y.max(0);
    let x_end = (position.x + plate.width as i32).min(target_width);
    let y_end = (position.y + plate.height as i32).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let existing = *target.get_pixel(tx as u32, ty as u32);
            target.put_pixel(tx as u32, ty as u32, blend_pixels(existing, paint, 1.0));
        }
    }
}

/// Blend two pixels using alpha compositing with additional opacity.
///
/// Uses the "over" operator: result = foreground + background * (1 - foreground.alpha)
pub(crate) fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
