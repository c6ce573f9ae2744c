//! Image encoder abstraction
//!
//! Photos are stored as JPEG; the standalone overlay is written as PNG so it
//! keeps its transparency. Both go through the same [`ImageEncoder`] trait.

use super::error::MediaError;
use crate::constants::DEFAULT_JPEG_QUALITY;
use image::DynamicImage;

/// Output formats the media library writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Quality settings for image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality {
    /// Quality value (1-100, where 100 is best quality)
    pub quality: u8,
}

impl Default for EncoderQuality {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EncoderQuality {
    /// Create quality settings with specified quality level
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

/// Result of encoding an image
#[derive(Debug)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self {
            data,
            content_type: format.content_type(),
            format,
        }
    }
}

/// Trait for image encoders
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode raw RGBA image data (4 bytes per pixel) to the target format
    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, MediaError>;

    /// Encode a decoded image of any color type.
    fn encode_image(
        &self,
        image: &DynamicImage,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, MediaError> {
        let rgba = image.to_rgba8();
        self.encode(rgba.as_raw(), rgba.width(), rgba.height(), quality)
    }
}

/// JPEG encoder using the image crate
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, MediaError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        // JPEG has no alpha channel
        let rgb_data = rgba_to_rgb(data);

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality.quality);

        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8)
            .map_err(|e| MediaError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Jpeg))
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, MediaError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder
            .write_image(data, width, height, image::ColorType::Rgba8)
            .map_err(|e| MediaError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Png))
    }
}

/// Drop the alpha channel from packed RGBA data.
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);

    for chunk in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }

    rgb
}
