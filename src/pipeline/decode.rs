//! Source image decoding with image bomb protection.
//!
//! The header is read first so oversized images are rejected before any
//! pixel buffer is allocated.

use image::io::Reader;
use image::DynamicImage;
use std::io::Cursor;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Reject images whose pixel count exceeds the configured limit.
pub fn validate_dimensions(
    width: u32,
    height: u32,
    limits: &LimitsConfig,
) -> Result<(), PipelineError> {
    let pixels = width as u64 * height as u64;
    if pixels > limits.max_source_pixels {
        return Err(PipelineError::ImageTooLarge {
            width,
            height,
            pixels,
            max_pixels: limits.max_source_pixels,
        });
    }

    Ok(())
}

/// Decode an encoded image, guessing the format from its content.
pub fn decode_image(data: &[u8], limits: &LimitsConfig) -> Result<DynamicImage, PipelineError> {
    let (width, height) = reader(data)?
        .into_dimensions()
        .map_err(|e| PipelineError::Decode(e.to_string()))?;

    validate_dimensions(width, height, limits)?;

    reader(data)?
        .decode()
        .map_err(|e| PipelineError::Decode(e.to_string()))
}

fn reader(data: &[u8]) -> Result<Reader<Cursor<&[u8]>>, PipelineError> {
    let reader = Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(PipelineError::Decode("unrecognized image format".to_string()));
    }

    Ok(reader)
}
