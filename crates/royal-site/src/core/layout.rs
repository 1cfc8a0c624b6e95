//! Geometry shared by the carousel renderers.

use serde::{Deserialize, Serialize};

/// Dimensions the renderers depend on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Window inner width in CSS pixels
    pub width: f64,
    /// Width of the carousel stage (falls back to the root width when zero)
    pub stage_width: f64,
}

impl Viewport {
    /// Viewport whose stage spans the whole window
    #[must_use]
    pub const fn new(width: f64) -> Self {
        Self {
            width,
            stage_width: width,
        }
    }

    /// Set the stage width
    #[must_use]
    pub const fn with_stage_width(mut self, stage_width: f64) -> Self {
        self.stage_width = stage_width;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0)
    }
}

/// Axis-aligned box in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rect
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Placement of the floating highlight panel behind the active slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightBox {
    /// Offset from the root's left edge
    pub x: f64,
    /// Offset from the root's top edge
    pub y: f64,
    /// Panel width
    pub width: f64,
    /// Panel height
    pub height: f64,
}

impl HighlightBox {
    /// Box exactly covering `item`, relative to `root`
    #[must_use]
    pub fn overlay(item: Rect, root: Rect) -> Self {
        Self {
            x: item.left - root.left,
            y: item.top - root.top,
            width: item.width,
            height: item.height,
        }
    }

    /// CSS transform placing the panel
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0)",
            css_number(self.x),
            css_number(self.y)
        )
    }
}

/// Format a number for inline CSS: four decimals at most, never `-0`.
#[must_use]
pub fn css_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{}", rounded + 0.0)
}
