// Constants module - centralized default values for configuration
//
// Defaults for every configuration section live here so the config types,
// the media library and the CLI agree on them.

// =============================================================================
// Media library defaults
// =============================================================================

/// Default library root, relative to the working directory
pub const DEFAULT_LIBRARY_ROOT: &str = "./gallery";

/// Default album (subdirectory of Pictures/ and Movies/)
pub const DEFAULT_ALBUM: &str = "WatermarkApp";

/// Default JPEG quality for saved photos
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default scratch directory for video processing output
pub const DEFAULT_WORK_DIRECTORY: &str = "./work";

// =============================================================================
// Limits
// =============================================================================

/// Default maximum decoded source size (100 megapixels)
pub const DEFAULT_MAX_SOURCE_PIXELS: u64 = 100_000_000;

/// Buffer size used when copying video files (64 KB)
pub const VIDEO_COPY_CHUNK_SIZE: usize = 64 * 1024;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "watermarking.yaml";
