//! Time-based tweens with ease-out curves.
//!
//! A [`Tween`] moves a scalar from `from` to `to` over a fixed duration. The
//! curve maps normalized progress `t ∈ [0, 1]` to eased progress in `[0, 1]`;
//! every curve here is monotonic and hits exactly 0 and 1 at the ends, so
//! tweened values never overshoot either endpoint.

#[cfg(test)]
#[path = "easing_test.rs"]
mod easing_test;

use serde::Deserialize;

/// Easing curve applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    /// `power3.out`: strong deceleration into the target.
    #[default]
    EaseOutCubic,
    EaseOutQuart,
}

impl Easing {
    /// Apply the curve to normalized progress. Input is clamped to [0, 1].
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t).powi(2),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// One in-flight interpolation of a scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    /// Clock time (seconds) the tween began.
    pub start: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, start: f64, duration: f64, easing: Easing) -> Self {
        Self { from, to, start, duration, easing }
    }

    /// Normalized progress at clock time `now`, clamped to [0, 1].
    #[must_use]
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated value at clock time `now`.
    #[must_use]
    pub fn value_at(&self, now: f64) -> f64 {
        let eased = self.easing.apply(self.progress(now));
        if eased >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * eased
    }

    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}
