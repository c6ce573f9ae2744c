//! Error types for media library operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode to {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("Invalid album name '{0}'")]
    InvalidAlbum(String),

    #[error("No free file name for {0} after {1} attempts")]
    NameExhausted(String, u32),
}

impl MediaError {
    /// Wrap an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub fn encode_failed(format: &'static str, message: impl Into<String>) -> Self {
        Self::Encode {
            format,
            message: message.into(),
        }
    }
}
