//! Text watermark rendering.
//!
//! Stamps a single line of text onto a raster image on top of a translucent
//! backing plate. Rendering is a pure function of the image, the font and a
//! [`WatermarkSettings`] value: the input image is never modified and the
//! same inputs always produce the same pixels.
//!
//! # Configuration Example
//!
//! ```yaml
//! watermark:
//!   text: "(c) Studio"
//!   text_size: 100
//!   opacity: 0.5
//!   position: bottom-right
//! ```
//!
//! # Layout
//!
//! - The plate is the measured text box plus 8px padding on every side.
//! - Corner positions keep the plate 20px in from the two nearest edges.
//! - `center` centres the plate on the image.
//! - Text that does not fit is clipped at the image bounds.

pub mod compositor;
pub mod config;
pub mod error;
pub mod position;
pub mod text_renderer;
pub mod tile;

// Re-export main types for convenience
pub use compositor::{apply_watermark, Compositor};
pub use config::{WatermarkPosition, WatermarkSettings};
pub use error::WatermarkError;
pub use position::{
    calculate_position, is_visible, layout_text, ImageDimensions, PlacementPosition,
    PlateDimensions, PlateLayout,
};
pub use text_renderer::{measure_text, TextMetrics, WatermarkFont};
pub use tile::render_overlay;
