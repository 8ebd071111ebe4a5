//! Viewport size and scroll offset: the source of truth for pixel↔world mapping.
//!
//! `ViewportState` is owned by the engine and passed by reference into every
//! component that needs it. It is written only by the resize and scroll
//! observers and read by everything else during a frame.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::error::EngineError;

/// An element's position and size in viewport (CSS pixel) coordinates.
///
/// Origin is the top-left corner of the viewport with Y growing downward,
/// matching `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    /// Whether the box covers a positive area.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whether `pt` (viewport coordinates) lies inside the box, edges inclusive.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.left + self.width && pt.y >= self.top && pt.y <= self.top + self.height
    }

    /// UV of `pt` within the box: (0, 0) bottom-left, (1, 1) top-right.
    #[must_use]
    pub fn uv_of(&self, pt: Point) -> Point {
        Point::new((pt.x - self.left) / self.width, 1.0 - (pt.y - self.top) / self.height)
    }

    /// The same box moved vertically by `dy` pixels.
    #[must_use]
    pub fn shifted_y(&self, dy: f64) -> Self {
        Self { top: self.top + dy, ..*self }
    }
}

/// Canvas size and scroll bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    width: f64,
    height: f64,
    scroll_y: f64,
    previous_scroll_y: f64,
}

impl ViewportState {
    /// Create a viewport of the given CSS size with no scroll.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidViewport`] if either dimension is not a
    /// positive finite number.
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        Self::with_scroll(width, height, 0.0)
    }

    /// Create a viewport for a page already scrolled to `scroll_y`.
    ///
    /// Both the current and previous scroll offsets start at `scroll_y`, so
    /// the first frame sees no scroll movement. A non-finite offset is
    /// treated as 0.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidViewport`] if either dimension is not a
    /// positive finite number.
    pub fn with_scroll(width: f64, height: f64, scroll_y: f64) -> Result<Self, EngineError> {
        validate_size(width, height)?;
        let scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
        Ok(Self { width, height, scroll_y, previous_scroll_y: scroll_y })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    #[must_use]
    pub fn previous_scroll_y(&self) -> f64 {
        self.previous_scroll_y
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Resample the viewport dimensions.
    ///
    /// Callers must reconfigure the camera afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidViewport`] and keeps the previous size if
    /// either dimension is not a positive finite number.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Record the latest observed vertical scroll offset.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
    }

    /// Pixels scrolled since the last [`commit_scroll`](Self::commit_scroll).
    #[must_use]
    pub fn scroll_delta(&self) -> f64 {
        (self.scroll_y - self.previous_scroll_y).abs()
    }

    /// Close out this frame's scroll bookkeeping.
    pub fn commit_scroll(&mut self) {
        self.previous_scroll_y = self.scroll_y;
    }
}

fn validate_size(width: f64, height: f64) -> Result<(), EngineError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidViewport { width, height })
    }
}
