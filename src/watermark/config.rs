//! Watermark settings.
//!
//! `WatermarkSettings` is an immutable value: every edit produces a new
//! settings value (`with_text`, `with_opacity`, ...) which the caller swaps in
//! wholesale. The compositor only ever borrows it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Default values
fn default_text() -> String {
    "Watermark".to_string()
}

fn default_text_size() -> f32 {
    100.0
}

fn default_opacity() -> f32 {
    0.5
}

/// Smallest accepted text size in pixels.
pub const MIN_TEXT_SIZE: f32 = 1.0;

/// Largest accepted text size in pixels.
pub const MAX_TEXT_SIZE: f32 = 1000.0;

/// Where the watermark plate is anchored on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl WatermarkPosition {
    /// All positions, in the order they are offered to users.
    pub const ALL: [WatermarkPosition; 5] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Center,
    ];

    /// Kebab-case name, as used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatermarkPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown watermark position '{}'. Expected one of: top-left, top-right, bottom-left, bottom-right, center",
                    s
                )
            })
    }
}

/// Text watermark settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkSettings {
    /// Text to stamp onto the image
    #[serde(default = "default_text")]
    pub text: String,

    /// Text size in pixels (default: 100)
    #[serde(default = "default_text_size")]
    pub text_size: f32,

    /// Opacity from 0.0 (transparent) to 1.0 (opaque), shared by the
    /// plate and the text (default: 0.5)
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Position on the image (default: bottom-right)
    #[serde(default)]
    pub position: WatermarkPosition,
}

impl Default for WatermarkSettings {
    fn default() -> Self {
        Self {
            text: default_text(),
            text_size: default_text_size(),
            opacity: default_opacity(),
            position: WatermarkPosition::default(),
        }
    }
}

impl WatermarkSettings {
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_text_size(&self, text_size: f32) -> Self {
        Self {
            text_size,
            ..self.clone()
        }
    }

    pub fn with_opacity(&self, opacity: f32) -> Self {
        Self {
            opacity,
            ..self.clone()
        }
    }

    pub fn with_position(&self, position: WatermarkPosition) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Alpha value used for both the plate and the text.
    pub fn alpha(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// True when there is nothing visible to draw.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), String> {
        // Check for NaN/Infinity and valid range
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!(
                "Watermark opacity must be a finite value between 0.0 and 1.0, got {}",
                self.opacity
            ));
        }

        if !self.text_size.is_finite() || !(MIN_TEXT_SIZE..=MAX_TEXT_SIZE).contains(&self.text_size)
        {
            return Err(format!(
                "Watermark text_size must be between {} and {} pixels, got {}",
                MIN_TEXT_SIZE, MAX_TEXT_SIZE, self.text_size
            ));
        }

        if self.text.contains(['\n', '\r']) {
            return Err("Watermark text must be a single line".to_string());
        }

        Ok(())
    }
}
