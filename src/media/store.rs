//! Media library on the local filesystem.
//!
//! Layout under the library root:
//!
//! ```text
//! <root>/Pictures/<album>/Watermarked_<millis>.jpg
//! <root>/Movies/<album>/Watermarked_<millis>.mp4
//! ```
//!
//! Names are reserved with `create_new`, so a save never overwrites an
//! existing entry; a `_<n>` suffix is appended on collision. A file whose
//! content could not be written is removed again.

use super::encoder::{EncoderQuality, ImageEncoder, JpegEncoder};
use super::error::MediaError;
use crate::config::MediaConfig;
use image::DynamicImage;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Prefix of every file name the library creates.
pub const DISPLAY_NAME_PREFIX: &str = "Watermarked_";

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Kind of media entry, which decides its collection directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Top-level collection directory name.
    pub fn collection(&self) -> &'static str {
        match self {
            MediaKind::Image => "Pictures",
            MediaKind::Video => "Movies",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
        }
    }
}

/// Handle to an entry created in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    kind: MediaKind,
    display_name: String,
    path: PathBuf,
}

impl MediaHandle {
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI of the entry.
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

/// Check that an album name is a single, non-empty path component.
pub fn validate_album_name(album: &str) -> Result<(), String> {
    if album.trim().is_empty() {
        return Err("Album name cannot be empty".to_string());
    }
    if album.contains(['/', '\\']) || album == "." || album == ".." {
        return Err(format!(
            "Album name '{}' must be a single directory name",
            album
        ));
    }
    Ok(())
}

/// Filesystem-backed media library.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    album: String,
    quality: EncoderQuality,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, album: impl Into<String>) -> Result<Self, MediaError> {
        let album = album.into();
        validate_album_name(&album).map_err(|_| MediaError::InvalidAlbum(album.clone()))?;

        Ok(Self {
            root: root.into(),
            album,
            quality: EncoderQuality::default(),
        })
    }

    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        Ok(Self::new(&config.library_root, &config.album)?
            .with_quality(EncoderQuality::with_quality(config.jpeg_quality)))
    }

    pub fn with_quality(mut self, quality: EncoderQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    /// Directory entries of the given kind are written to.
    pub fn collection_dir(&self, kind: MediaKind) -> PathBuf {
        self.root.join(kind.collection()).join(&self.album)
    }

    /// Encode `image` as JPEG and add it to the picture collection.
    pub async fn save_image(&self, image: &DynamicImage) -> Result<MediaHandle, MediaError> {
        let encoded = JpegEncoder.encode_image(image, self.quality)?;
        let (mut file, handle) = self.reserve(MediaKind::Image).await?;

        let written = write_synced(&mut file, &encoded.data).await;
        drop(file);

        self.finish(handle, written).await
    }

    /// Copy the video at `source` byte for byte into the movie collection.
    pub async fn save_video(&self, source: &Path) -> Result<MediaHandle, MediaError> {
        let mut input = File::open(source)
            .await
            .map_err(|e| MediaError::file(source, e))?;
        let (mut file, handle) = self.reserve(MediaKind::Video).await?;

        let written = copy_synced(&mut input, &mut file).await;
        drop(file);

        self.finish(handle, written).await
    }

    /// Create a new, empty file with a free display name.
    async fn reserve(&self, kind: MediaKind) -> Result<(File, MediaHandle), MediaError> {
        let dir = self.collection_dir(kind);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| MediaError::file(&dir, e))?;

        let stem = format!(
            "{}{}",
            DISPLAY_NAME_PREFIX,
            chrono::Utc::now().timestamp_millis()
        );

        match create_unique(&dir, &stem, kind.extension()).await {
            Ok(Some((file, display_name))) => {
                let path = dir.join(&display_name);
                debug!(path = %path.display(), "Reserved media entry");
                Ok((
                    file,
                    MediaHandle {
                        kind,
                        display_name,
                        path,
                    },
                ))
            }
            Ok(None) => Err(MediaError::NameExhausted(stem, MAX_NAME_ATTEMPTS)),
            Err((path, e)) => Err(MediaError::file(path, e)),
        }
    }

    async fn finish(
        &self,
        handle: MediaHandle,
        written: std::io::Result<()>,
    ) -> Result<MediaHandle, MediaError> {
        match written {
            Ok(()) => {
                info!(
                    uri = %handle.uri(),
                    mime_type = handle.kind.mime_type(),
                    "Saved to media library"
                );
                Ok(handle)
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&handle.path).await {
                    warn!(
                        path = %handle.path.display(),
                        error = %cleanup,
                        "Failed to remove incomplete media entry"
                    );
                }
                Err(MediaError::file(handle.path, e))
            }
        }
    }
}

/// Create `<dir>/<stem>.<extension>` without touching existing files,
/// falling back to `<stem>_<n>.<extension>` while a name is taken.
///
/// Returns the open file and its file name, or `None` once every suffix is
/// taken. On error the path that failed is returned with it.
pub(crate) async fn create_unique(
    dir: &Path,
    stem: &str,
    extension: &str,
) -> Result<Option<(File, String)>, (PathBuf, std::io::Error)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("{}.{}", stem, extension)
        } else {
            format!("{}_{}.{}", stem, attempt, extension)
        };
        let path = dir.join(&name);

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok(Some((file, name))),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err((path, e)),
        }
    }
    Ok(None)
}

async fn write_synced(file: &mut File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.sync_all().await
}

async fn copy_synced(input: &mut File, file: &mut File) -> std::io::Result<()> {
    tokio::io::copy(input, file).await?;
    file.sync_all().await
}
