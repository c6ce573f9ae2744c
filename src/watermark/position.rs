//! Placement arithmetic for the watermark plate and its text.
//!
//! The plate is a rectangle sized to the measured text plus `PLATE_PADDING`
//! on every side. It is anchored `EDGE_MARGIN` pixels in from the image edges
//! selected by the position (or centered). The text is then anchored inside
//! the plate with an alignment derived from the same position.
//!
//! # Example
//!
//! ```
//! use watermarking::watermark::position::{calculate_position, ImageDimensions, PlateDimensions};
//! use watermarking::watermark::WatermarkPosition;
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let plate = PlateDimensions { width: 100, height: 50 };
//!
//! let pos = calculate_position(WatermarkPosition::BottomRight, &image, &plate, 20);
//! assert_eq!((pos.x, pos.y), (680, 530)); // 800 - 100 - 20, 600 - 50 - 20
//! ```

use super::WatermarkPosition;

/// Distance between the plate and the image edges it is anchored to.
pub const EDGE_MARGIN: u32 = 20;

/// Space between the text box and the plate border.
pub const PLATE_PADDING: u32 = 8;

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the backing plate drawn behind the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateDimensions {
    pub width: u32,
    pub height: u32,
}

impl PlateDimensions {
    /// Size a plate to contain a text box of the given size plus padding.
    pub fn around_text(text_width: f32, text_height: f32, padding: u32) -> Self {
        Self {
            width: text_width.max(0.0).ceil() as u32 + 2 * padding,
            height: text_height.max(0.0).ceil() as u32 + 2 * padding,
        }
    }
}

/// Top-left corner of the plate in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Horizontal alignment of the text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl From<WatermarkPosition> for TextAlign {
    fn from(position: WatermarkPosition) -> Self {
        match position {
            WatermarkPosition::TopLeft | WatermarkPosition::BottomLeft => TextAlign::Left,
            WatermarkPosition::TopRight | WatermarkPosition::BottomRight => TextAlign::Right,
            WatermarkPosition::Center => TextAlign::Center,
        }
    }
}

/// Anchor point of the text: an x coordinate interpreted through `align`,
/// and the baseline y coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub x: f32,
    pub baseline: f32,
    pub align: TextAlign,
}

impl TextAnchor {
    /// Left edge of a text run of `text_width` pixels drawn at this anchor.
    pub fn origin_x(&self, text_width: f32) -> f32 {
        match self.align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x - text_width / 2.0,
            TextAlign::Right => self.x - text_width,
        }
    }
}

/// Full layout of one watermark on one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateLayout {
    pub placement: PlacementPosition,
    pub plate: PlateDimensions,
    pub anchor: TextAnchor,
}

impl PlateLayout {
    /// Right edge of the plate (exclusive).
    pub fn right(&self) -> i32 {
        self.placement.x + self.plate.width as i32
    }

    /// Bottom edge of the plate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.placement.y + self.plate.height as i32
    }
}

/// Calculate where the plate's top-left corner goes.
///
/// Coordinates may be negative if the plate is larger than the image.
pub fn calculate_position(
    position: WatermarkPosition,
    image: &ImageDimensions,
    plate: &PlateDimensions,
    margin: u32,
) -> PlacementPosition {
    let img_w = image.width as i32;
    let img_h = image.height as i32;
    let wm_w = plate.width as i32;
    let wm_h = plate.height as i32;
    let m = margin as i32;

    match position {
        WatermarkPosition::TopLeft => PlacementPosition::new(m, m),
        WatermarkPosition::TopRight => PlacementPosition::new(img_w - wm_w - m, m),
        WatermarkPosition::BottomLeft => PlacementPosition::new(m, img_h - wm_h - m),
        WatermarkPosition::BottomRight => PlacementPosition::new(img_w - wm_w - m, img_h - wm_h - m),
        WatermarkPosition::Center => PlacementPosition::new((img_w - wm_w) / 2, (img_h - wm_h) / 2),
    }
}

/// Calculate the text anchor inside a placed plate.
pub fn text_anchor(
    position: WatermarkPosition,
    placement: PlacementPosition,
    plate: &PlateDimensions,
    padding: u32,
    ascent: f32,
) -> TextAnchor {
    let align = TextAlign::from(position);
    let left = placement.x as f32;
    let x = match align {
        TextAlign::Left => left + padding as f32,
        TextAlign::Center => left + plate.width as f32 / 2.0,
        TextAlign::Right => left + plate.width as f32 - padding as f32,
    };

    TextAnchor {
        x,
        baseline: placement.y as f32 + padding as f32 + ascent,
        align,
    }
}

/// Lay out a text box of `text_width` x `text_height` (with the given font
/// ascent) on an image, using the standard margin and padding.
pub fn layout_text(
    position: WatermarkPosition,
    image: &ImageDimensions,
    text_width: f32,
    text_height: f32,
    ascent: f32,
) -> PlateLayout {
    let plate = PlateDimensions::around_text(text_width, text_height, PLATE_PADDING);
    let placement = calculate_position(position, image, &plate, EDGE_MARGIN);
    let anchor = text_anchor(position, placement, &plate, PLATE_PADDING, ascent);

    PlateLayout {
        placement,
        plate,
        anchor,
    }
}

/// Check if a placed plate is at least partially visible within the image.
pub fn is_visible(
    pos: &PlacementPosition,
    image: &ImageDimensions,
    plate: &PlateDimensions,
) -> bool {
    let right = pos.x + plate.width as i32;
    let bottom = pos.y + plate.height as i32;

    pos.x < image.width as i32 && pos.y < image.height as i32 && right > 0 && bottom > 0
}
