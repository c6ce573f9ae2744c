// Test harness for integration tests
// Provides a throwaway media library and fixture images on disk

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use watermarking::config::LimitsConfig;
use watermarking::media::MediaStore;
use watermarking::pipeline::ImagePipeline;
use watermarking::watermark::Compositor;

pub const TEST_ALBUM: &str = "WatermarkApp";

/// Temporary library root plus a directory for input fixtures.
/// Everything is removed when the harness is dropped.
pub struct LibraryHarness {
    dir: TempDir,
}

impl LibraryHarness {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn library_root(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    pub fn work_directory(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn input_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn store(&self) -> MediaStore {
        MediaStore::new(self.library_root(), TEST_ALBUM).expect("valid album")
    }

    pub fn pipeline(&self) -> ImagePipeline {
        ImagePipeline::new(
            Compositor::with_embedded_font().expect("embedded font loads"),
            self.store(),
            LimitsConfig::default(),
        )
    }

    /// Write a gradient fixture in the given format and return its path.
    pub fn write_image(&self, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
        let path = self.input_path(name);
        std::fs::write(&path, encode(&gradient(width, height), format)).expect("write fixture");
        path
    }

    pub fn write_bytes(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.input_path(name);
        std::fs::write(&path, data).expect("write fixture");
        path
    }

    /// Files currently in `dir`, sorted by name. Empty if `dir` is missing.
    pub fn list(dir: &Path) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(read) => read.map(|e| e.expect("dir entry").path()).collect(),
            Err(_) => Vec::new(),
        };
        entries.sort();
        entries
    }
}

pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    }))
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).expect("encode fixture");
    out.into_inner()
}

/// Mean absolute per-channel difference between two RGB images of equal size.
pub fn mean_abs_diff(a: &DynamicImage, b: &DynamicImage) -> f64 {
    let a = a.to_rgb8();
    let b = b.to_rgb8();
    assert_eq!(a.dimensions(), b.dimensions());

    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(x, y)| (*x as i32 - *y as i32).unsigned_abs() as u64)
        .sum();
    total as f64 / a.as_raw().len() as f64
}
