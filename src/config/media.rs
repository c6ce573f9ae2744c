//! Media library and resource limit configuration.
//!
//! Default values are sourced from `crate::constants`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ALBUM, DEFAULT_JPEG_QUALITY, DEFAULT_LIBRARY_ROOT, DEFAULT_MAX_SOURCE_PIXELS,
    DEFAULT_WORK_DIRECTORY,
};

fn default_library_root() -> PathBuf {
    PathBuf::from(DEFAULT_LIBRARY_ROOT)
}

fn default_album() -> String {
    DEFAULT_ALBUM.to_string()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_work_directory() -> PathBuf {
    PathBuf::from(DEFAULT_WORK_DIRECTORY)
}

fn default_max_source_pixels() -> u64 {
    DEFAULT_MAX_SOURCE_PIXELS
}

/// Where and how output is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Library root containing Pictures/ and Movies/ (default: ./gallery)
    #[serde(default = "default_library_root")]
    pub library_root: PathBuf,
    /// Album subdirectory (default: WatermarkApp)
    #[serde(default = "default_album")]
    pub album: String,
    /// JPEG quality for saved photos, 1-100 (default: 90)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Scratch directory for video processing output (default: ./work)
    #[serde(default = "default_work_directory")]
    pub work_directory: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            library_root: default_library_root(),
            album: default_album(),
            jpeg_quality: default_jpeg_quality(),
            work_directory: default_work_directory(),
        }
    }
}

/// Decode safety limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum width * height of a source image (default: 100 megapixels)
    #[serde(default = "default_max_source_pixels")]
    pub max_source_pixels: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_source_pixels: default_max_source_pixels(),
        }
    }
}

/// Optional font override
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// TrueType/OpenType file; the embedded font is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
