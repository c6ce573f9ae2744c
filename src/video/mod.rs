//! Video processing.
//!
//! Frames are not decoded: the "watermarked" video is a byte-for-byte copy
//! of the source, written to the work directory on a spawned task. Progress
//! (bytes copied against total size) is published on a `watch` channel and
//! only one video may be in flight per processor.

use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::constants::VIDEO_COPY_CHUNK_SIZE;
use crate::error::PipelineError;
use crate::guard::ProcessingFlag;
use crate::media::store::create_unique;
use crate::media::MediaKind;
use crate::watermark::WatermarkSettings;

/// Copy progress of a running job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoProgress {
    pub bytes_copied: u64,
    pub total_bytes: u64,
    pub done: bool,
}

impl VideoProgress {
    /// Completed fraction in `[0, 1]`. An empty source counts as complete
    /// once the job is done.
    pub fn fraction(&self) -> f32 {
        if self.total_bytes == 0 {
            return if self.done { 1.0 } else { 0.0 };
        }
        (self.bytes_copied as f64 / self.total_bytes as f64).min(1.0) as f32
    }
}

/// A video job running in the background.
pub struct VideoJob {
    progress: watch::Receiver<VideoProgress>,
    handle: JoinHandle<Result<PathBuf, PipelineError>>,
}

impl VideoJob {
    /// Subscribe to progress updates.
    pub fn progress(&self) -> watch::Receiver<VideoProgress> {
        self.progress.clone()
    }

    /// Wait for the job and return the path of the processed file.
    pub async fn wait(self) -> Result<PathBuf, PipelineError> {
        self.handle
            .await
            .map_err(|e| PipelineError::TaskFailed(e.to_string()))?
    }
}

#[derive(Debug, Clone)]
pub struct VideoWatermarkProcessor {
    work_directory: PathBuf,
    processing: ProcessingFlag,
}

impl VideoWatermarkProcessor {
    pub fn new(work_directory: impl Into<PathBuf>) -> Self {
        Self {
            work_directory: work_directory.into(),
            processing: ProcessingFlag::new(),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_processing()
    }

    /// Start processing `source` on a new task.
    ///
    /// Must be called from within a tokio runtime. Returns
    /// [`PipelineError::AlreadyProcessing`] while another job of this
    /// processor is still running.
    pub fn start(
        &self,
        source: PathBuf,
        settings: &WatermarkSettings,
    ) -> Result<VideoJob, PipelineError> {
        let guard = self
            .processing
            .try_acquire()
            .ok_or(PipelineError::AlreadyProcessing)?;

        warn!(
            source = %source.display(),
            text = %settings.text,
            "Video watermarking is not implemented; the output is an unmodified copy"
        );

        let (tx, rx) = watch::channel(VideoProgress::default());
        let work_directory = self.work_directory.clone();

        let handle = tokio::spawn(async move {
            let _guard = guard;
            process_video(&source, &work_directory, &tx).await
        });

        Ok(VideoJob {
            progress: rx,
            handle,
        })
    }
}

async fn process_video(
    source: &Path,
    work_directory: &Path,
    progress: &watch::Sender<VideoProgress>,
) -> Result<PathBuf, PipelineError> {
    info!(source = %source.display(), "Starting video processing");

    let mut input = File::open(source)
        .await
        .map_err(|e| PipelineError::read(source, e))?;
    let total_bytes = input
        .metadata()
        .await
        .map_err(|e| PipelineError::read(source, e))?
        .len();

    tokio::fs::create_dir_all(work_directory)
        .await
        .map_err(|e| PipelineError::write(work_directory, e))?;

    // Other processors may share the work directory
    let stem = format!("watermarked_{}", chrono::Utc::now().timestamp_millis());
    let extension = MediaKind::Video.extension();
    let (mut out, name) = match create_unique(work_directory, &stem, extension).await {
        Ok(Some(created)) => created,
        Ok(None) => {
            return Err(PipelineError::write(
                work_directory.join(format!("{}.{}", stem, extension)),
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "no free output name"),
            ))
        }
        Err((path, e)) => return Err(PipelineError::write(path, e)),
    };
    let output = work_directory.join(name);

    let copied = copy_with_progress(
        &mut input,
        source,
        &mut out,
        &output,
        total_bytes,
        progress,
    )
    .await;
    drop(out);

    match copied {
        Ok(bytes) => {
            info!(output = %output.display(), bytes, "Video copied");
            Ok(output)
        }
        Err(e) => {
            // Leave no partial output behind
            if tokio::fs::remove_file(&output).await.is_ok() {
                debug!(output = %output.display(), "Removed partial video output");
            }
            Err(e)
        }
    }
}

async fn copy_with_progress(
    input: &mut File,
    source: &Path,
    out: &mut File,
    output: &Path,
    total_bytes: u64,
    progress: &watch::Sender<VideoProgress>,
) -> Result<u64, PipelineError> {
    let mut state = VideoProgress {
        bytes_copied: 0,
        total_bytes,
        done: false,
    };
    progress.send_replace(state);

    let mut buf = vec![0u8; VIDEO_COPY_CHUNK_SIZE];
    loop {
        let n = input
            .read(&mut buf)
            .await
            .map_err(|e| PipelineError::read(source, e))?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])
            .await
            .map_err(|e| PipelineError::write(output, e))?;

        state.bytes_copied += n as u64;
        progress.send_replace(state);
    }

    out.sync_all()
        .await
        .map_err(|e| PipelineError::write(output, e))?;

    state.done = true;
    progress.send_replace(state);

    Ok(state.bytes_copied)
}
