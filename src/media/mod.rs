//! Media library module
//!
//! Stores watermarked output where a gallery would pick it up:
//! - Photos re-encoded as JPEG under `Pictures/<album>`
//! - Videos copied byte for byte under `Movies/<album>`
//! - Encoders for JPEG (photos) and PNG (overlays)

pub mod encoder;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use encoder::{EncodedImage, EncoderQuality, ImageEncoder, JpegEncoder, OutputFormat, PngEncoder};
pub use error::MediaError;
pub use store::{validate_album_name, MediaHandle, MediaKind, MediaStore};
