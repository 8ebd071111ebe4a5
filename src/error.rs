//! Error taxonomy for the plane engine.
//!
//! None of these are fatal to the page. Per-element errors cause that element
//! to be skipped during binding; viewport and config errors leave the previous
//! state untouched.

/// Errors produced while binding elements or reconfiguring the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The element has no image source to texture the plane with.
    #[error("element {index} has no image source")]
    MissingSource { index: usize },

    /// The image decoded to zero natural width or height.
    #[error("element {index} has zero natural size ({width}x{height})")]
    ZeroNaturalSize { index: usize, width: f64, height: f64 },

    /// The element occupies no layout area, so there is nothing to cover.
    #[error("element {index} has no measurable bounding box ({width}x{height})")]
    ZeroLayoutSize { index: usize, width: f64, height: f64 },

    /// A resize reported a non-positive or non-finite viewport.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An enter/leave event named an element that was never bound.
    #[error("no tracked element at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
