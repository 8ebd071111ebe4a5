#![allow(clippy::float_cmp)]

use super::*;

fn vp(w: f64, h: f64) -> ViewportState {
    ViewportState::new(w, h).expect("valid viewport")
}

// =============================================================
// BoundingBox
// =============================================================

#[test]
fn box_has_area() {
    assert!(BoundingBox::new(0.0, 0.0, 10.0, 10.0).has_area());
    assert!(!BoundingBox::new(0.0, 0.0, 0.0, 10.0).has_area());
    assert!(!BoundingBox::new(0.0, 0.0, 10.0, -1.0).has_area());
}

#[test]
fn box_contains_is_edge_inclusive() {
    let b = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
    assert!(b.contains(Point::new(20.0, 10.0)));
    assert!(b.contains(Point::new(120.0, 60.0)));
    assert!(b.contains(Point::new(70.0, 35.0)));
    assert!(!b.contains(Point::new(19.9, 35.0)));
    assert!(!b.contains(Point::new(70.0, 60.1)));
}

#[test]
fn box_uv_has_origin_bottom_left() {
    let b = BoundingBox::new(0.0, 0.0, 200.0, 100.0);
    assert_eq!(b.uv_of(Point::new(0.0, 100.0)), Point::new(0.0, 0.0));
    assert_eq!(b.uv_of(Point::new(200.0, 0.0)), Point::new(1.0, 1.0));
    assert_eq!(b.uv_of(Point::new(50.0, 25.0)), Point::new(0.25, 0.75));
}

#[test]
fn box_shifted_y_keeps_size() {
    let b = BoundingBox::new(10.0, 20.0, 30.0, 40.0).shifted_y(-15.0);
    assert_eq!(b, BoundingBox::new(-5.0, 20.0, 30.0, 40.0));
}

// =============================================================
// ViewportState
// =============================================================

#[test]
fn new_rejects_non_positive_size() {
    assert_eq!(
        ViewportState::new(0.0, 800.0),
        Err(EngineError::InvalidViewport { width: 0.0, height: 800.0 })
    );
    assert!(ViewportState::new(1000.0, -1.0).is_err());
    assert!(ViewportState::new(f64::NAN, 800.0).is_err());
    assert!(ViewportState::new(f64::INFINITY, 800.0).is_err());
}

#[test]
fn new_starts_unscrolled() {
    let v = vp(1000.0, 800.0);
    assert_eq!(v.scroll_y(), 0.0);
    assert_eq!(v.previous_scroll_y(), 0.0);
    assert_eq!(v.scroll_delta(), 0.0);
}

#[test]
fn with_scroll_seeds_both_offsets() {
    let v = ViewportState::with_scroll(1000.0, 800.0, 3000.0).expect("valid viewport");
    assert_eq!(v.scroll_y(), 3000.0);
    assert_eq!(v.previous_scroll_y(), 3000.0);
    assert_eq!(v.scroll_delta(), 0.0);
}

#[test]
fn with_scroll_treats_non_finite_offset_as_top() {
    let v = ViewportState::with_scroll(1000.0, 800.0, f64::NAN).expect("valid viewport");
    assert_eq!(v.scroll_y(), 0.0);
    assert!(ViewportState::with_scroll(0.0, 800.0, 10.0).is_err());
}

#[test]
fn aspect_and_center() {
    let v = vp(1000.0, 800.0);
    assert_eq!(v.aspect(), 1.25);
    assert_eq!(v.center(), Point::new(500.0, 400.0));
}

#[test]
fn resize_updates_dimensions() {
    let mut v = vp(1000.0, 800.0);
    assert!(v.on_resize(640.0, 480.0).is_ok());
    assert_eq!(v.width(), 640.0);
    assert_eq!(v.height(), 480.0);
}

#[test]
fn invalid_resize_keeps_previous_size() {
    let mut v = vp(1000.0, 800.0);
    assert!(v.on_resize(0.0, 0.0).is_err());
    assert_eq!(v.width(), 1000.0);
    assert_eq!(v.height(), 800.0);
}

#[test]
fn resize_preserves_scroll() {
    let mut v = vp(1000.0, 800.0);
    v.on_scroll(120.0);
    assert!(v.on_resize(640.0, 480.0).is_ok());
    assert_eq!(v.scroll_y(), 120.0);
}

#[test]
fn scroll_delta_is_absolute() {
    let mut v = vp(1000.0, 800.0);
    v.on_scroll(300.0);
    v.commit_scroll();
    v.on_scroll(250.0);
    assert_eq!(v.scroll_delta(), 50.0);
}

#[test]
fn commit_scroll_zeroes_delta() {
    let mut v = vp(1000.0, 800.0);
    v.on_scroll(75.0);
    assert_eq!(v.scroll_delta(), 75.0);
    v.commit_scroll();
    assert_eq!(v.previous_scroll_y(), 75.0);
    assert_eq!(v.scroll_delta(), 0.0);
}

#[test]
fn multiple_scrolls_between_frames_use_latest() {
    let mut v = vp(1000.0, 800.0);
    v.on_scroll(10.0);
    v.on_scroll(40.0);
    v.on_scroll(30.0);
    assert_eq!(v.scroll_delta(), 30.0);
}

#[test]
fn non_finite_scroll_is_ignored() {
    let mut v = vp(1000.0, 800.0);
    v.on_scroll(20.0);
    v.on_scroll(f64::NAN);
    assert_eq!(v.scroll_y(), 20.0);
}
