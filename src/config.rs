//! Engine configuration parsed from a JSON object handed in by the host page.
//!
//! Every field is optional; absent fields take the defaults from
//! [`crate::consts`]. Unknown keys are rejected so typos surface as errors
//! instead of silently falling back to defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_DISTORTION_FACTOR, DEFAULT_FAR, DEFAULT_FOCAL_DISTANCE, DEFAULT_HOVER_DURATION_SECS, DEFAULT_NEAR,
};
use crate::easing::Easing;
use crate::error::EngineError;

/// How pointer movement is turned into hover targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitMode {
    /// Cast a ray from the camera through the pointer and intersect every mesh.
    #[default]
    Ray,
    /// Test the pointer against each element's viewport bounding box.
    Rect,
    /// Ignore pointer moves; the host reports enter/leave per element.
    Manual,
}

/// How a plane's bounding box is obtained each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Query the element's bounding box every frame.
    #[default]
    Resample,
    /// Measure once at bind time in page coordinates, then offset by the
    /// current scroll each frame. Assumes the layout never reflows.
    ScrollOffset,
}

/// Typed engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub focal_distance: f64,
    pub near: f64,
    pub far: f64,
    pub hover_duration_secs: f64,
    pub hover_easing: Easing,
    pub hit_mode: HitMode,
    pub layout_mode: LayoutMode,
    pub distortion_enabled: bool,
    pub distortion_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            focal_distance: DEFAULT_FOCAL_DISTANCE,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            hover_duration_secs: DEFAULT_HOVER_DURATION_SECS,
            hover_easing: Easing::default(),
            hit_mode: HitMode::default(),
            layout_mode: LayoutMode::default(),
            distortion_enabled: true,
            distortion_factor: DEFAULT_DISTORTION_FACTOR,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config object.
    ///
    /// An empty or whitespace-only string yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] on malformed JSON, unknown keys,
    /// or values rejected by [`validate`](Self::validate).
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_json::from_str(raw).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the camera clip range contains the image plane and that
    /// timing values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.focal_distance.is_finite() && self.focal_distance > 0.0) {
            return Err(invalid(format!("focal_distance must be positive, got {}", self.focal_distance)));
        }
        if !(self.near.is_finite() && self.near > 0.0 && self.far.is_finite() && self.near < self.far) {
            return Err(invalid(format!("expected 0 < near < far, got near={} far={}", self.near, self.far)));
        }
        if self.focal_distance <= self.near || self.focal_distance >= self.far {
            return Err(invalid(format!(
                "focal_distance {} outside clip range ({}, {})",
                self.focal_distance, self.near, self.far
            )));
        }
        if !(self.hover_duration_secs.is_finite() && self.hover_duration_secs >= 0.0) {
            return Err(invalid(format!("hover_duration_secs must be >= 0, got {}", self.hover_duration_secs)));
        }
        if !(self.distortion_factor.is_finite() && self.distortion_factor >= 0.0) {
            return Err(invalid(format!("distortion_factor must be >= 0, got {}", self.distortion_factor)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidConfig(msg)
}
