//! Geometric types and overlay placement
//!
//! Provides type-safe wrappers for positions and sizes to avoid
//! common integer confusion (e.g., swapping width/height or x/y),
//! plus the anchor arithmetic that places overlay windows on screen.

use serde::{Deserialize, Serialize};

/// A position in 2D space (root window coordinates)
///
/// Coordinates are i32 on purpose: offsets may place an overlay partially
/// or fully off-screen, so the math must neither clamp nor wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions (width x height)
/// Using a newtype prevents accidentally swapping width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen anchor an overlay window is placed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

/// Compute the top-left corner for an overlay window.
///
/// The anchor picks a base point from the screen and window sizes, then the
/// configured offsets are added. All arithmetic is integer (centering
/// truncates on odd sizes) and the result is never clamped to the screen.
pub fn compute_position(
    anchor: Anchor,
    offset_x: i32,
    offset_y: i32,
    screen: Dimensions,
    window: Dimensions,
) -> Position {
    let sw = i32::from(screen.width);
    let sh = i32::from(screen.height);
    let ww = i32::from(window.width);
    let wh = i32::from(window.height);

    let (base_x, base_y) = match anchor {
        Anchor::TopLeft => (0, 0),
        Anchor::TopCenter => (sw / 2 - ww / 2, 0),
        Anchor::TopRight => (sw - ww, 0),
        Anchor::Center => (sw / 2 - ww / 2, sh / 2 - wh / 2),
        Anchor::BottomLeft => (0, sh - wh),
        Anchor::BottomCenter => (sw / 2 - ww / 2, sh - wh),
        Anchor::BottomRight => (sw - ww, sh - wh),
    };

    Position::new(base_x + offset_x, base_y + offset_y)
}
