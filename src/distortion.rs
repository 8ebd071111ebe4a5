//! Scroll-velocity post-process distortion.
//!
//! Strength is recomputed from scratch every frame as `|Δscroll| · factor`.
//! There is no smoothing, so strength drops to zero on the first frame without
//! scroll movement. The shader consuming it offsets horizontal UV sampling near
//! the top and bottom screen edges; that part belongs to the renderer.

#[cfg(test)]
#[path = "distortion_test.rs"]
mod distortion_test;

use crate::render::PostPass;
use crate::viewport::ViewportState;

/// State of the full-screen distortion pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDistortionPass {
    factor: f64,
    strength: f64,
    enabled: bool,
}

impl ScrollDistortionPass {
    #[must_use]
    pub fn new(factor: f64, enabled: bool) -> Self {
        Self { factor, strength: 0.0, enabled }
    }

    #[must_use]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Recompute strength from the scroll movement since the last frame.
    ///
    /// Does not commit the viewport's scroll bookkeeping; the frame loop does
    /// that once every consumer has read the delta.
    pub fn update(&mut self, viewport: &ViewportState) -> f64 {
        self.strength = viewport.scroll_delta() * self.factor;
        self.strength
    }

    /// The post pass to compose after the scene, if the effect is enabled.
    #[must_use]
    pub fn pass(&self) -> Option<PostPass> {
        self.enabled.then_some(PostPass { strength: self.strength })
    }
}
