#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::RAY_PARALLEL_EPSILON;
use crate::viewport::{BoundingBox, ViewportState};

/// A point or 2D vector in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point or direction in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }

    #[must_use]
    pub fn add_scaled(self, dir: Self, t: f64) -> Self {
        Self::new(self.x + dir.x * t, self.y + dir.y * t, self.z + dir.z * t)
    }
}

/// A half-line in world space used for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length.
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalized() }
    }

    /// Distance along the ray to the plane `z = plane_z`, if it is in front of the origin.
    #[must_use]
    pub fn distance_to_z_plane(&self, plane_z: f64) -> Option<f64> {
        if self.direction.z.abs() < RAY_PARALLEL_EPSILON {
            return None;
        }
        let t = (plane_z - self.origin.z) / self.direction.z;
        if t < 0.0 { None } else { Some(t) }
    }

    #[must_use]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin.add_scaled(self.direction, t)
    }
}

/// Perspective parameters of the pixel-mapped camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraParams {
    pub vertical_fov_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    /// Distance from the camera to the `z = 0` plane the meshes live on.
    pub focal_distance: f64,
}

/// Vertical field of view (degrees) at which `height` pixels at `focal_distance`
/// exactly fill the view.
#[must_use]
pub fn vertical_fov_degrees(height: f64, focal_distance: f64) -> f64 {
    2.0 * (height / 2.0 / focal_distance).atan() * (180.0 / std::f64::consts::PI)
}

/// World-space center of a mesh covering `bounds`.
///
/// Converts top-left-origin, Y-down screen space into center-origin, Y-up
/// world space.
#[must_use]
pub fn world_center_for(bounds: &BoundingBox, viewport: &ViewportState) -> Point {
    Point {
        x: bounds.left - viewport.width() / 2.0 + bounds.width / 2.0,
        y: -bounds.top + viewport.height() / 2.0 - bounds.height / 2.0,
    }
}

/// Perspective camera on the +Z axis looking at the origin, tuned so one world
/// unit equals one CSS pixel at `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    params: CameraParams,
    position: Vec3,
}

impl CameraRig {
    /// Build a rig already configured for `viewport`.
    #[must_use]
    pub fn new(focal_distance: f64, near: f64, far: f64, viewport: &ViewportState) -> Self {
        let mut rig = Self {
            params: CameraParams { vertical_fov_degrees: 0.0, aspect: 1.0, near, far, focal_distance },
            position: Vec3::new(0.0, 0.0, focal_distance),
        };
        rig.configure_for_pixel_mapping(viewport);
        rig
    }

    #[must_use]
    pub fn params(&self) -> CameraParams {
        self.params
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Recompute aspect, FOV, and position for the current viewport.
    ///
    /// Must be re-invoked after every viewport resize.
    pub fn configure_for_pixel_mapping(&mut self, viewport: &ViewportState) {
        let focal = self.params.focal_distance;
        self.params.aspect = viewport.aspect();
        self.params.vertical_fov_degrees = vertical_fov_degrees(viewport.height(), focal);
        self.position = Vec3::new(0.0, 0.0, focal);
    }

    fn tan_half_fov(&self) -> f64 {
        (self.params.vertical_fov_degrees.to_radians() / 2.0).tan()
    }

    /// Project a world point to viewport coordinates (CSS pixels, Y down).
    ///
    /// Returns `None` for points at or behind the camera.
    #[must_use]
    pub fn project_point(&self, world: Vec3, viewport: &ViewportState) -> Option<Point> {
        let depth = self.position.z - world.z;
        if depth <= 0.0 {
            return None;
        }
        let half_h = depth * self.tan_half_fov();
        let half_w = half_h * self.params.aspect;
        let ndc_x = (world.x - self.position.x) / half_w;
        let ndc_y = (world.y - self.position.y) / half_h;
        Some(Point {
            x: (ndc_x + 1.0) / 2.0 * viewport.width(),
            y: (1.0 - ndc_y) / 2.0 * viewport.height(),
        })
    }

    /// Project an axis-aligned world rectangle back to a viewport bounding box.
    #[must_use]
    pub fn project_rect(&self, center: Vec3, scale: Point, viewport: &ViewportState) -> Option<BoundingBox> {
        let top_left = Vec3::new(center.x - scale.x / 2.0, center.y + scale.y / 2.0, center.z);
        let bottom_right = Vec3::new(center.x + scale.x / 2.0, center.y - scale.y / 2.0, center.z);
        let tl = self.project_point(top_left, viewport)?;
        let br = self.project_point(bottom_right, viewport)?;
        Some(BoundingBox { top: tl.y, left: tl.x, width: br.x - tl.x, height: br.y - tl.y })
    }

    /// Picking ray through normalized device coordinates.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Point) -> Ray {
        let tan_half = self.tan_half_fov();
        let dir = Vec3::new(ndc.x * tan_half * self.params.aspect, ndc.y * tan_half, -1.0);
        Ray::new(self.position, dir)
    }
}

/// Convert a viewport point to normalized device coordinates (X right, Y up, [-1, 1]).
#[must_use]
pub fn pointer_to_ndc(pointer: Point, viewport: &ViewportState) -> Point {
    Point {
        x: (pointer.x / viewport.width()) * 2.0 - 1.0,
        y: -(pointer.y / viewport.height()) * 2.0 + 1.0,
    }
}
