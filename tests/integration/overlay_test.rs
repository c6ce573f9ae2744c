// Standalone overlay written out as PNG

use watermarking::media::{EncoderQuality, ImageEncoder, OutputFormat, PngEncoder};
use watermarking::watermark::tile::{OVERLAY_BACKGROUND_ALPHA, OVERLAY_PADDING};
use watermarking::watermark::{measure_text, render_overlay, WatermarkError, WatermarkFont};

#[test]
fn test_overlay_png_keeps_transparency() {
    let font = WatermarkFont::embedded().unwrap();
    let overlay = render_overlay(&font, "(c) Studio", 48.0).unwrap();

    let encoded = PngEncoder
        .encode_image(
            &image::DynamicImage::ImageRgba8(overlay.clone()),
            EncoderQuality::default(),
        )
        .unwrap();
    assert_eq!(encoded.format, OutputFormat::Png);
    assert_eq!(encoded.content_type, "image/png");

    let decoded = image::load_from_memory(&encoded.data).unwrap().to_rgba8();
    assert_eq!(decoded, overlay);

    // Corners are background only
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, OVERLAY_BACKGROUND_ALPHA]);
    let (w, h) = decoded.dimensions();
    assert_eq!(decoded.get_pixel(w - 1, h - 1).0, [0, 0, 0, OVERLAY_BACKGROUND_ALPHA]);

    // Some text pixels are lighter than the background
    assert!(decoded.pixels().any(|p| p[0] > 128));
}

#[test]
fn test_overlay_dimensions_follow_text() {
    let font = WatermarkFont::embedded().unwrap();
    let metrics = measure_text(&font, "Watermark", 30.0);
    let overlay = render_overlay(&font, "Watermark", 30.0).unwrap();

    assert_eq!(overlay.width(), (metrics.width + OVERLAY_PADDING * 2.0) as u32);
    assert_eq!(overlay.height(), (metrics.height + OVERLAY_PADDING * 2.0) as u32);
}

#[test]
fn test_overlay_rejects_empty_text() {
    let font = WatermarkFont::embedded().unwrap();
    assert!(matches!(
        render_overlay(&font, "", 30.0),
        Err(WatermarkError::RenderError(_))
    ));
}
