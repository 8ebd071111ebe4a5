//! Host-element seam: what the engine needs to know about a tracked image.
//!
//! The engine only reads from elements. The browser implementation lives in
//! [`crate::web`]; tests and non-browser hosts provide their own.

use crate::viewport::BoundingBox;

/// A DOM image the engine keeps a plane pinned to.
pub trait ImageElement {
    /// Current bounding box in viewport coordinates (`getBoundingClientRect`).
    fn bounding_box(&self) -> BoundingBox;

    /// Intrinsic pixel dimensions of the decoded image, `(width, height)`.
    /// Zero in either axis means the image failed to decode.
    fn natural_size(&self) -> (f64, f64);

    /// URL of the image to texture the plane with, if the element has one.
    fn source(&self) -> Option<String>;
}
