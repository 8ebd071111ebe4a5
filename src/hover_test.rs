#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Vec3;
use crate::config::LayoutMode;
use crate::dom::ImageElement;
use crate::plane::bind_all;
use crate::render::MaterialTemplate;
use crate::viewport::BoundingBox;

const UV_TOLERANCE: f64 = 1e-6;
const FRAME: f64 = 1.0 / 60.0;

// =============================================================
// Helpers
// =============================================================

#[derive(Debug, Clone, Copy)]
struct FakeImage(BoundingBox);

impl ImageElement for FakeImage {
    fn bounding_box(&self) -> BoundingBox {
        self.0
    }

    fn natural_size(&self) -> (f64, f64) {
        (800.0, 600.0)
    }

    fn source(&self) -> Option<String> {
        Some("a.jpg".to_owned())
    }
}

struct Scene {
    viewport: ViewportState,
    camera: CameraRig,
    planes: Vec<TrackedElement<FakeImage>>,
}

fn scene(boxes: &[BoundingBox]) -> Scene {
    let viewport = ViewportState::new(1000.0, 800.0).expect("valid viewport");
    let camera = CameraRig::new(600.0, 100.0, 2000.0, &viewport);
    let (planes, skipped) = bind_all(
        boxes.iter().copied().map(FakeImage),
        &MaterialTemplate::default(),
        LayoutMode::Resample,
        &viewport,
    );
    assert_eq!(skipped, 0);
    Scene { viewport, camera, planes }
}

fn two_planes() -> Scene {
    scene(&[BoundingBox::new(100.0, 200.0, 300.0, 150.0), BoundingBox::new(400.0, 600.0, 200.0, 200.0)])
}

fn interactor(mode: HitMode) -> HoverInteractor {
    HoverInteractor::new(mode, 2.0, Easing::EaseOutCubic)
}

impl Scene {
    fn move_to(&mut self, hover: &mut HoverInteractor, x: f64, y: f64, now: f64) {
        hover.on_pointer_move(Point::new(x, y), &mut self.planes, &self.camera, &self.viewport, now);
    }

    fn targets(&self) -> Vec<f64> {
        self.planes.iter().map(TrackedElement::hover_target).collect()
    }
}

fn approx_point(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < UV_TOLERANCE && (a.y - b.y).abs() < UV_TOLERANCE
}

// =============================================================
// intersect_mesh
// =============================================================

#[test]
fn ray_through_mesh_center_hits_uv_center() {
    let s = two_planes();
    let t = s.planes[0].transform();
    let ray = Ray::new(Vec3::new(t.position.x, t.position.y, 600.0), Vec3::new(0.0, 0.0, -1.0));
    let Some(hit) = intersect_mesh(&ray, &t) else {
        panic!("ray through the center should hit");
    };
    assert_eq!(hit.distance, 600.0);
    assert!(approx_point(hit.uv, Point::new(0.5, 0.5)));
}

#[test]
fn ray_outside_mesh_misses() {
    let s = two_planes();
    let t = s.planes[0].transform();
    let ray = Ray::new(Vec3::new(t.position.x + 151.0, t.position.y, 600.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(intersect_mesh(&ray, &t), None);
}

#[test]
fn degenerate_mesh_is_never_hit() {
    let t = MeshTransform { position: Vec3::default(), scale: Point::new(0.0, 10.0) };
    let ray = Ray::new(Vec3::new(0.0, 0.0, 600.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(intersect_mesh(&ray, &t), None);
}

// =============================================================
// Ray picking
// =============================================================

#[test]
fn pointer_over_plane_starts_hovering() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    assert_eq!(s.targets(), vec![1.0, 0.0]);
    assert_eq!(s.planes[0].hover_phase(), HoverPhase::Hovering);
    assert_eq!(hover.pointer(), Some(Point::new(350.0, 175.0)));
}

#[test]
fn hover_position_is_hit_uv() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    // A quarter of the way in from the left, a quarter down from the top.
    s.move_to(&mut hover, 275.0, 137.5, 0.0);
    assert!(approx_point(s.planes[0].hover_position(), Point::new(0.25, 0.75)));
    assert_eq!(s.planes[1].hover_position(), Point::new(0.5, 0.5));
}

#[test]
fn hover_position_updates_immediately_but_state_eases() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    hover.advance(&mut s.planes, FRAME);
    assert!(s.planes[0].hover_state() < 0.1);
    s.move_to(&mut hover, 260.0, 175.0, FRAME);
    assert!(approx_point(s.planes[0].hover_position(), Point::new(0.2, 0.5)));
}

#[test]
fn ray_miss_resets_every_target_in_the_same_call() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    assert!(hover.on_pointer_enter(1, Point::new(700.0, 500.0), &mut s.planes, 0.0).is_ok());
    s.move_to(&mut hover, 350.0, 175.0, 0.1);
    assert_eq!(s.targets(), vec![1.0, 0.0]);

    s.move_to(&mut hover, 5.0, 5.0, 0.2);

    assert_eq!(s.targets(), vec![0.0, 0.0]);
}

#[test]
fn moving_between_planes_swaps_hover() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    s.move_to(&mut hover, 700.0, 500.0, 0.5);
    assert_eq!(s.targets(), vec![0.0, 1.0]);
}

#[test]
fn overlapping_planes_all_hover_but_only_nearest_gets_position() {
    let mut s = scene(&[BoundingBox::new(0.0, 0.0, 400.0, 400.0), BoundingBox::new(100.0, 100.0, 400.0, 400.0)]);
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 200.0, 200.0, 0.0);
    assert_eq!(s.targets(), vec![1.0, 1.0]);
    assert!(approx_point(s.planes[0].hover_position(), Point::new(0.5, 0.5)));
    assert_eq!(s.planes[1].hover_position(), Point::new(0.5, 0.5));

    s.move_to(&mut hover, 100.0, 300.0, 0.1);
    assert!(approx_point(s.planes[0].hover_position(), Point::new(0.25, 0.25)));
    assert_eq!(s.planes[1].hover_position(), Point::new(0.5, 0.5));
}

#[test]
fn picking_follows_scrolled_transforms() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    // Simulate the page having scrolled the first plane up by 100px.
    let moved = MeshTransform::for_box(&BoundingBox::new(0.0, 200.0, 300.0, 150.0), &s.viewport);
    let ray = s.camera.ray_from_ndc(pointer_to_ndc(Point::new(350.0, 75.0), &s.viewport));
    assert!(intersect_mesh(&ray, &moved).is_some());
    s.move_to(&mut hover, 350.0, 75.0, 0.0);
    assert_eq!(s.targets(), vec![0.0, 0.0]);
}

// =============================================================
// Rect picking
// =============================================================

#[test]
fn rect_mode_hits_by_bounding_box() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Rect);
    s.move_to(&mut hover, 275.0, 137.5, 0.0);
    assert_eq!(s.targets(), vec![1.0, 0.0]);
    assert_eq!(s.planes[0].hover_position(), Point::new(0.25, 0.75));

    s.move_to(&mut hover, 999.0, 10.0, 0.1);
    assert_eq!(s.targets(), vec![0.0, 0.0]);
}

// =============================================================
// Manual enter / leave
// =============================================================

#[test]
fn manual_mode_ignores_pointer_moves() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Manual);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    assert_eq!(s.targets(), vec![0.0, 0.0]);
    assert_eq!(hover.pointer(), Some(Point::new(350.0, 175.0)));
}

#[test]
fn enter_and_leave_drive_phase() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Manual);
    assert!(hover.on_pointer_enter(0, Point::new(350.0, 175.0), &mut s.planes, 0.0).is_ok());
    assert_eq!(s.targets(), vec![1.0, 0.0]);
    assert_eq!(s.planes[0].hover_position(), Point::new(0.5, 0.5));
    assert!(hover.on_pointer_leave(0, &mut s.planes, 1.0).is_ok());
    assert_eq!(s.targets(), vec![0.0, 0.0]);
}

#[test]
fn enter_unknown_index_is_an_error() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Manual);
    assert_eq!(
        hover.on_pointer_enter(5, Point::new(0.0, 0.0), &mut s.planes, 0.0),
        Err(EngineError::IndexOutOfRange { index: 5, len: 2 })
    );
    assert!(hover.on_pointer_leave(2, &mut s.planes, 0.0).is_err());
}

#[test]
fn release_all_idles_everything() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Manual);
    assert!(hover.on_pointer_enter(0, Point::new(350.0, 175.0), &mut s.planes, 0.0).is_ok());
    assert!(hover.on_pointer_enter(1, Point::new(700.0, 500.0), &mut s.planes, 0.0).is_ok());
    hover.release_all(&mut s.planes, 0.5);
    assert_eq!(s.targets(), vec![0.0, 0.0]);
    assert_eq!(hover.pointer(), None);
}

// =============================================================
// Easing
// =============================================================

#[test]
fn hover_state_rises_monotonically_to_one() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);

    let mut prev = 0.0;
    for frame in 1..=180 {
        hover.advance(&mut s.planes, f64::from(frame) * FRAME);
        let v = s.planes[0].hover_state();
        assert!(v >= prev, "hover state fell from {prev} to {v} at frame {frame}");
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
    assert_eq!(s.planes[0].hover_state(), 1.0);
    assert_eq!(s.planes[1].hover_state(), 0.0);
}

#[test]
fn hover_state_eases_out_rather_than_snapping() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    hover.advance(&mut s.planes, 1.0);
    let halfway = s.planes[0].hover_state();
    // Cubic ease-out at half duration is 0.875.
    assert!((halfway - 0.875).abs() < 1e-9);
}

#[test]
fn leaving_mid_tween_eases_down_from_current_value() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    hover.advance(&mut s.planes, 0.5);
    let peak = s.planes[0].hover_state();
    assert!(peak > 0.0 && peak < 1.0);

    s.move_to(&mut hover, 5.0, 5.0, 0.5);
    hover.advance(&mut s.planes, 0.5);
    assert_eq!(s.planes[0].hover_state(), peak);

    let mut prev = peak;
    for frame in 1..=150 {
        hover.advance(&mut s.planes, 0.5 + f64::from(frame) * FRAME);
        let v = s.planes[0].hover_state();
        assert!(v <= prev);
        assert!(v >= 0.0);
        prev = v;
    }
    assert_eq!(s.planes[0].hover_state(), 0.0);
}

#[test]
fn repeated_moves_over_same_plane_do_not_restart_tween() {
    let mut s = two_planes();
    let mut hover = interactor(HitMode::Ray);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    for i in 1..=10 {
        s.move_to(&mut hover, 350.0 + f64::from(i), 175.0, f64::from(i) * 0.1);
    }
    hover.advance(&mut s.planes, 2.0);
    assert_eq!(s.planes[0].hover_state(), 1.0);
}

#[test]
fn zero_duration_snaps_on_next_advance() {
    let mut s = two_planes();
    let mut hover = HoverInteractor::new(HitMode::Ray, 0.0, Easing::EaseOutCubic);
    s.move_to(&mut hover, 350.0, 175.0, 0.0);
    hover.advance(&mut s.planes, 0.0);
    assert_eq!(s.planes[0].hover_state(), 1.0);
}

#[test]
fn advance_without_tween_leaves_state_alone() {
    let mut s = two_planes();
    let hover = interactor(HitMode::Ray);
    hover.advance(&mut s.planes, 10.0);
    assert_eq!(s.planes[0].hover_state(), 0.0);
    assert_eq!(s.planes[1].hover_state(), 0.0);
}
