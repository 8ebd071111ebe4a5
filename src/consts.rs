//! Shared numeric constants for the plane engine.

// ── Camera ──────────────────────────────────────────────────────

/// Default camera-to-plane depth in CSS pixels.
pub const DEFAULT_FOCAL_DISTANCE: f64 = 600.0;

/// Default near clip plane.
pub const DEFAULT_NEAR: f64 = 100.0;

/// Default far clip plane.
pub const DEFAULT_FAR: f64 = 2000.0;

// ── Hover ───────────────────────────────────────────────────────

/// Seconds for the hover state to travel from one end of [0, 1] to the other.
pub const DEFAULT_HOVER_DURATION_SECS: f64 = 2.0;

/// Hover position before the pointer has touched a plane (UV center).
pub const DEFAULT_HOVER_POSITION: (f64, f64) = (0.5, 0.5);

/// Hover state below which a settled tween is snapped to its target.
pub const HOVER_EPSILON: f64 = 1e-6;

// ── Distortion ──────────────────────────────────────────────────

/// Distortion strength per CSS pixel of scroll per frame.
pub const DEFAULT_DISTORTION_FACTOR: f64 = 0.05;

// ── Picking ─────────────────────────────────────────────────────

/// Ray direction components smaller than this are treated as parallel to a plane.
pub const RAY_PARALLEL_EPSILON: f64 = 1e-9;
