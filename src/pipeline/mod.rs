//! Photo pipeline: read, decode, watermark, save.
//!
//! A batch is processed sequentially on the calling task. A failing item is
//! recorded in the [`BatchReport`] and the batch continues with the next one.
//! Only one batch may run per pipeline at a time.

pub mod decode;

use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Config, LimitsConfig};
use crate::error::PipelineError;
use crate::guard::ProcessingFlag;
use crate::media::{MediaHandle, MediaStore};
use crate::watermark::{Compositor, WatermarkError, WatermarkFont, WatermarkSettings};

pub use decode::{decode_image, validate_dimensions};

/// An input that was not saved, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub saved: Vec<MediaHandle>,
    pub skipped: Vec<SkippedItem>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.saved.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// One-line summary for the user.
    pub fn summary(&self) -> String {
        if self.skipped.is_empty() {
            format!("{} images processed successfully", self.saved.len())
        } else {
            format!(
                "{} images processed, {} skipped",
                self.saved.len(),
                self.skipped.len()
            )
        }
    }
}

pub struct ImagePipeline {
    compositor: Compositor,
    store: MediaStore,
    limits: LimitsConfig,
    processing: ProcessingFlag,
}

impl ImagePipeline {
    pub fn new(compositor: Compositor, store: MediaStore, limits: LimitsConfig) -> Self {
        Self {
            compositor,
            store,
            limits,
            processing: ProcessingFlag::new(),
        }
    }

    /// Build a pipeline from configuration, loading the configured font.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let font = WatermarkFont::load(config.font.path.as_deref())?;
        let store = MediaStore::from_config(&config.media)?;
        Ok(Self::new(Compositor::new(font), store, config.limits.clone()))
    }

    pub fn store(&self) -> &MediaStore {
        &self.store
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_processing()
    }

    /// Decode and watermark an encoded image without saving it.
    pub fn watermark_bytes(
        &self,
        data: &[u8],
        settings: &WatermarkSettings,
    ) -> Result<DynamicImage, PipelineError> {
        let source = decode_image(data, &self.limits)?;
        Ok(self.compositor.compose(&source, settings)?)
    }

    /// Watermark one file and save it to the library.
    pub async fn process_file(
        &self,
        path: &Path,
        settings: &WatermarkSettings,
    ) -> Result<MediaHandle, PipelineError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| PipelineError::read(path, e))?;
        let stamped = self.watermark_bytes(&data, settings)?;
        Ok(self.store.save_image(&stamped).await?)
    }

    /// Watermark and save every input in order.
    ///
    /// Fails with [`PipelineError::AlreadyProcessing`] while another batch
    /// runs, or with a watermark configuration error for invalid settings.
    /// Per-item failures end up in the report.
    pub async fn process_batch(
        &self,
        inputs: &[PathBuf],
        settings: &WatermarkSettings,
    ) -> Result<BatchReport, PipelineError> {
        settings.validate().map_err(WatermarkError::ConfigError)?;

        let _guard = self
            .processing
            .try_acquire()
            .ok_or(PipelineError::AlreadyProcessing)?;

        let mut report = BatchReport::default();

        for path in inputs {
            match self.process_file(path, settings).await {
                Ok(handle) => {
                    info!(input = %path.display(), uri = %handle.uri(), "Watermarked image saved");
                    report.saved.push(handle);
                }
                Err(e) => {
                    warn!(input = %path.display(), error = %e, "Skipping image");
                    report.skipped.push(SkippedItem {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            saved = report.saved.len(),
            skipped = report.skipped.len(),
            "{}",
            report.summary()
        );

        Ok(report)
    }
}
