//! Hover interaction: pointer → per-plane hover target → eased hover state.
//!
//! Each plane is either `Idle` (target 0) or `Hovering` (target 1). Pointer
//! moves pick which planes are under the pointer, using either a camera ray
//! against every mesh or a point-in-rectangle test against every bounding box.
//! Hosts that prefer DOM enter/leave events call
//! [`HoverInteractor::on_pointer_enter`] / [`HoverInteractor::on_pointer_leave`]
//! directly.
//!
//! A phase change starts a [`Tween`] from the current hover state; each frame
//! [`HoverInteractor::advance`] samples it into the plane's `hover_state`
//! uniform. The hover position (UV of the nearest hit) is written immediately
//! and never eased.

#[cfg(test)]
#[path = "hover_test.rs"]
mod hover_test;

use crate::camera::{CameraRig, Point, Ray, pointer_to_ndc};
use crate::config::HitMode;
use crate::consts::HOVER_EPSILON;
use crate::easing::{Easing, Tween};
use crate::error::EngineError;
use crate::plane::{HoverPhase, MeshTransform, TrackedElement};
use crate::viewport::ViewportState;

/// Where a picking ray met a plane mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f64,
    /// (0, 0) bottom-left, (1, 1) top-right.
    pub uv: Point,
}

/// Intersect `ray` with the axis-aligned plane mesh described by `transform`.
#[must_use]
pub fn intersect_mesh(ray: &Ray, transform: &MeshTransform) -> Option<RayHit> {
    let scale = transform.scale;
    if scale.x <= 0.0 || scale.y <= 0.0 {
        return None;
    }
    let distance = ray.distance_to_z_plane(transform.position.z)?;
    let hit = ray.at(distance);
    let u = (hit.x - (transform.position.x - scale.x / 2.0)) / scale.x;
    let v = (hit.y - (transform.position.y - scale.y / 2.0)) / scale.y;
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }
    Some(RayHit { distance, uv: Point::new(u, v) })
}

/// Drives hover targets from pointer input and eases hover state every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverInteractor {
    mode: HitMode,
    duration: f64,
    easing: Easing,
    pointer: Option<Point>,
}

impl HoverInteractor {
    #[must_use]
    pub fn new(mode: HitMode, duration: f64, easing: Easing) -> Self {
        Self { mode, duration, easing, pointer: None }
    }

    /// Last pointer position seen, in viewport coordinates.
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Re-pick hover targets for a pointer at `pointer` (viewport coordinates).
    ///
    /// Planes under the pointer start hovering and every other plane goes idle.
    /// When nothing is hit every plane goes idle. The nearest hit plane's hover
    /// position is set to the hit UV. In [`HitMode::Manual`] only the pointer
    /// position is recorded.
    pub fn on_pointer_move<E>(
        &mut self,
        pointer: Point,
        planes: &mut [TrackedElement<E>],
        camera: &CameraRig,
        viewport: &ViewportState,
        now: f64,
    ) {
        self.pointer = Some(pointer);
        let hits: Vec<Option<RayHit>> = match self.mode {
            HitMode::Manual => return,
            HitMode::Ray => {
                let ray = camera.ray_from_ndc(pointer_to_ndc(pointer, viewport));
                planes.iter().map(|p| intersect_mesh(&ray, &p.transform())).collect()
            }
            HitMode::Rect => planes
                .iter()
                .map(|p| {
                    let bounds = p.bounds();
                    (bounds.has_area() && bounds.contains(pointer))
                        .then(|| RayHit { distance: 0.0, uv: bounds.uv_of(pointer) })
                })
                .collect(),
        };

        let nearest = hits
            .iter()
            .enumerate()
            .filter_map(|(i, hit)| hit.map(|h| (i, h)))
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance));

        if let Some((i, hit)) = nearest {
            planes[i].material_mut().uniforms.hover_position = hit.uv;
        } else {
            tracing::trace!(x = pointer.x, y = pointer.y, "pointer missed every plane");
        }

        for (plane, hit) in planes.iter_mut().zip(&hits) {
            let phase = if hit.is_some() { HoverPhase::Hovering } else { HoverPhase::Idle };
            self.set_phase(plane, phase, now);
        }
    }

    /// DOM enter event for plane `index`. The hover position is taken from
    /// where `pointer` sits inside the plane's bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] if no plane has that index.
    pub fn on_pointer_enter<E>(
        &mut self,
        index: usize,
        pointer: Point,
        planes: &mut [TrackedElement<E>],
        now: f64,
    ) -> Result<(), EngineError> {
        let len = planes.len();
        let plane = planes.get_mut(index).ok_or(EngineError::IndexOutOfRange { index, len })?;
        self.pointer = Some(pointer);
        let bounds = plane.bounds();
        if bounds.has_area() {
            plane.material_mut().uniforms.hover_position = bounds.uv_of(pointer);
        }
        self.set_phase(plane, HoverPhase::Hovering, now);
        Ok(())
    }

    /// DOM leave event for plane `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] if no plane has that index.
    pub fn on_pointer_leave<E>(
        &mut self,
        index: usize,
        planes: &mut [TrackedElement<E>],
        now: f64,
    ) -> Result<(), EngineError> {
        let len = planes.len();
        let plane = planes.get_mut(index).ok_or(EngineError::IndexOutOfRange { index, len })?;
        self.set_phase(plane, HoverPhase::Idle, now);
        Ok(())
    }

    /// The pointer left the page entirely: every plane goes idle.
    pub fn release_all<E>(&mut self, planes: &mut [TrackedElement<E>], now: f64) {
        self.pointer = None;
        for plane in planes {
            self.set_phase(plane, HoverPhase::Idle, now);
        }
    }

    /// Sample every in-flight tween into its plane's `hover_state` uniform.
    pub fn advance<E>(&self, planes: &mut [TrackedElement<E>], now: f64) {
        for plane in planes {
            let Some(tween) = plane.hover.tween else {
                continue;
            };
            let mut value = tween.value_at(now).clamp(0.0, 1.0);
            let finished = tween.is_finished(now) || (value - tween.to).abs() < HOVER_EPSILON;
            if finished {
                value = tween.to;
                plane.hover.tween = None;
            }
            plane.material_mut().uniforms.hover_state = value;
        }
    }

    /// Move `plane` into `phase`. Re-entering the current phase leaves any
    /// running tween untouched.
    fn set_phase<E>(&self, plane: &mut TrackedElement<E>, phase: HoverPhase, now: f64) {
        if plane.hover.phase == phase {
            return;
        }
        plane.hover.phase = phase;
        let from = plane.hover_state();
        plane.hover.tween = Some(Tween::new(from, phase.target(), now, self.duration, self.easing));
    }
}
