//! Plane bindings: one textured mesh pinned to one DOM image.
//!
//! A [`TrackedElement`] owns the element handle, the last-sampled bounding box,
//! the mesh transform derived from it, and an exclusively-owned material
//! instance. The collection is built once by [`bind_all`] after the host's
//! images have loaded and never changes size afterwards.
//!
//! Elements that cannot be bound (no source, undecoded image, no layout area)
//! are skipped with a warning so the remaining planes still appear.

#[cfg(test)]
#[path = "plane_test.rs"]
mod plane_test;

use serde::Serialize;

use crate::camera::{Point, Vec3, world_center_for};
use crate::config::LayoutMode;
use crate::dom::ImageElement;
use crate::easing::Tween;
use crate::error::EngineError;
use crate::render::{Material, MaterialTemplate, PlaneOutput, Texture};
use crate::viewport::{BoundingBox, ViewportState};

/// World-space placement of a unit plane mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MeshTransform {
    pub position: Vec3,
    pub scale: Point,
}

impl MeshTransform {
    /// Transform that makes a unit plane cover `bounds` under the pixel-mapped camera.
    #[must_use]
    pub fn for_box(bounds: &BoundingBox, viewport: &ViewportState) -> Self {
        let center = world_center_for(bounds, viewport);
        Self {
            position: Vec3::new(center.x, center.y, 0.0),
            scale: Point::new(bounds.width, bounds.height),
        }
    }
}

/// Interaction phase of one plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPhase {
    /// Hover target 0.
    #[default]
    Idle,
    /// Hover target 1.
    Hovering,
}

impl HoverPhase {
    /// The value `hover_state` eases toward in this phase.
    #[must_use]
    pub fn target(self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Hovering => 1.0,
        }
    }
}

/// Hover bookkeeping for one plane. The eased value itself lives in the
/// material's `hover_state` uniform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverTrack {
    pub phase: HoverPhase,
    pub tween: Option<Tween>,
}

/// A DOM image and the plane that mirrors it.
#[derive(Debug)]
pub struct TrackedElement<E> {
    element: E,
    index: usize,
    layout: LayoutMode,
    bounds: BoundingBox,
    /// Bounds at bind time in page coordinates (viewport box + scroll).
    page_bounds: BoundingBox,
    transform: MeshTransform,
    material: Material,
    pub(crate) hover: HoverTrack,
}

impl<E: ImageElement> TrackedElement<E> {
    /// Sample `element` and build its plane.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingSource`] if the element has no image URL.
    /// - [`EngineError::ZeroNaturalSize`] if the image did not decode.
    /// - [`EngineError::ZeroLayoutSize`] if the element has no on-screen area.
    pub fn create(
        index: usize,
        element: E,
        template: &MaterialTemplate,
        layout: LayoutMode,
        viewport: &ViewportState,
    ) -> Result<Self, EngineError> {
        let source = element.source().filter(|s| !s.is_empty()).ok_or(EngineError::MissingSource { index })?;

        let (natural_width, natural_height) = element.natural_size();
        if !(natural_width > 0.0 && natural_height > 0.0) {
            return Err(EngineError::ZeroNaturalSize { index, width: natural_width, height: natural_height });
        }

        let bounds = element.bounding_box();
        if !bounds.has_area() {
            return Err(EngineError::ZeroLayoutSize { index, width: bounds.width, height: bounds.height });
        }

        let material = template.instantiate(Texture { source, natural_width, natural_height });
        Ok(Self {
            element,
            index,
            layout,
            bounds,
            page_bounds: bounds.shifted_y(viewport.scroll_y()),
            transform: MeshTransform::for_box(&bounds, viewport),
            material,
            hover: HoverTrack::default(),
        })
    }

    /// Re-sample the bounding box and re-apply the mesh transform.
    ///
    /// Idempotent: with no scroll, resize, or reflow in between, two calls
    /// produce the same transform.
    pub fn refresh(&mut self, viewport: &ViewportState) {
        self.bounds = match self.layout {
            LayoutMode::Resample => self.element.bounding_box(),
            LayoutMode::ScrollOffset => self.page_bounds.shifted_y(-viewport.scroll_y()),
        };
        self.transform = MeshTransform::for_box(&self.bounds, viewport);
    }
}

impl<E> TrackedElement<E> {
    /// Write the ambient-animation clock into the time uniform.
    pub fn update_time(&mut self, elapsed_secs: f64) {
        self.material.uniforms.time = elapsed_secs;
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bounding box as of the last refresh.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    #[must_use]
    pub fn transform(&self) -> MeshTransform {
        self.transform
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    pub(crate) fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    #[must_use]
    pub fn hover_state(&self) -> f64 {
        self.material.uniforms.hover_state
    }

    #[must_use]
    pub fn hover_target(&self) -> f64 {
        self.hover.phase.target()
    }

    #[must_use]
    pub fn hover_phase(&self) -> HoverPhase {
        self.hover.phase
    }

    #[must_use]
    pub fn hover_position(&self) -> Point {
        self.material.uniforms.hover_position
    }

    /// Snapshot for the renderer.
    #[must_use]
    pub fn output(&self) -> PlaneOutput {
        PlaneOutput {
            index: self.index,
            position: self.transform.position,
            scale: self.transform.scale,
            uniforms: self.material.uniforms,
        }
    }
}

/// Bind every element in order, skipping the ones that fail.
///
/// Returns the bound planes (indexed densely from 0) and the number skipped.
pub fn bind_all<E, I>(
    elements: I,
    template: &MaterialTemplate,
    layout: LayoutMode,
    viewport: &ViewportState,
) -> (Vec<TrackedElement<E>>, usize)
where
    E: ImageElement,
    I: IntoIterator<Item = E>,
{
    let mut planes = Vec::new();
    let mut skipped = 0;
    for (position, element) in elements.into_iter().enumerate() {
        match TrackedElement::create(planes.len(), element, template, layout, viewport) {
            Ok(plane) => planes.push(plane),
            Err(e) => {
                skipped += 1;
                tracing::warn!(position, error = %e, "skipping element");
            }
        }
    }
    tracing::info!(bound = planes.len(), skipped, "planes bound");
    (planes, skipped)
}
