// Error types module

use std::path::PathBuf;
use thiserror::Error;

use crate::media::MediaError;
use crate::watermark::WatermarkError;

/// Errors from processing a photo or video end to end.
///
/// Per-item failures in a batch (`Read`, `Write`, `Decode`, `ImageTooLarge`, `Watermark`,
/// `Media`) are recorded and the batch moves on. `AlreadyProcessing` and
/// invalid settings reject the whole invocation.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Image dimensions {width}x{height} ({pixels} pixels) exceed the limit of {max_pixels} pixels")]
    ImageTooLarge {
        width: u32,
        height: u32,
        pixels: u64,
        max_pixels: u64,
    },

    #[error(transparent)]
    Watermark(#[from] WatermarkError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Another operation is already in progress")]
    AlreadyProcessing,

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl PipelineError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
