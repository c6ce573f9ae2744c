// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::media::validate_album_name;
use crate::watermark::WatermarkSettings;

pub mod logging;
pub mod media;

// Re-export all config types
pub use logging::{LogFormat, LoggingConfig};
pub use media::{FontConfig, LimitsConfig, MediaConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watermark: WatermarkSettings,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        // An empty document means "all defaults"
        if substituted.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    ///
    /// The boolean is true when the file was actually read.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool), String> {
        if path.as_ref().exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.watermark.validate()?;

        if let Some(font_path) = &self.font.path {
            if font_path.as_os_str().is_empty() {
                return Err("Font path cannot be empty when set".to_string());
            }
        }

        validate_album_name(&self.media.album)?;

        if !(1..=100).contains(&self.media.jpeg_quality) {
            return Err(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.media.jpeg_quality
            ));
        }

        if self.media.library_root.as_os_str().is_empty() {
            return Err("Media library_root cannot be empty".to_string());
        }

        if self.media.work_directory.as_os_str().is_empty() {
            return Err("Media work_directory cannot be empty".to_string());
        }

        if self.limits.max_source_pixels == 0 {
            return Err("limits.max_source_pixels must be greater than 0".to_string());
        }

        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.logging.level, e))?;

        Ok(())
    }
}
