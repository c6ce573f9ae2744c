//! Watermark error types.
//!
//! Defines errors that can occur while rendering a watermark.

use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkError {
    /// Font data could not be read or parsed
    FontError(String),

    /// Failed to render text watermark
    RenderError(String),

    /// Invalid settings
    ConfigError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontError(msg) => write!(f, "Failed to load watermark font: {}", msg),
            Self::RenderError(msg) => write!(f, "Failed to render text watermark: {}", msg),
            Self::ConfigError(msg) => write!(f, "Watermark configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
