#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Rect ---

#[test]
fn rect_contains_interior_point() {
    let r = Rect::new(10.0, 10.0, 100.0, 50.0);
    assert!(r.contains(Point::new(50.0, 30.0)));
}

#[test]
fn rect_contains_edges() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
}

#[test]
fn rect_excludes_outside_point() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!r.contains(Point::new(10.1, 5.0)));
    assert!(!r.contains(Point::new(5.0, -0.1)));
}

#[test]
fn rect_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 40.0);
    assert!(point_approx_eq(r.center(), Point::new(60.0, 40.0)));
}

// --- cover_scale ---

#[test]
fn cover_scale_wide_background_tall_viewport() {
    // Background 2000x1000 in a 1000x1000 viewport: width alone would need
    // 0.5, height needs 1.0 — cover takes the max.
    let scale = cover_scale(Size::new(2000.0, 1000.0), Size::new(1000.0, 1000.0));
    assert_eq!(scale, 1.0);
}

#[test]
fn cover_scale_upscales_small_background() {
    let scale = cover_scale(Size::new(100.0, 100.0), Size::new(400.0, 200.0));
    assert_eq!(scale, 4.0);
}

#[test]
fn cover_scale_matches_exact_fit() {
    let scale = cover_scale(Size::new(800.0, 600.0), Size::new(800.0, 600.0));
    assert_eq!(scale, 1.0);
}

#[test]
fn cover_scale_degenerate_background_is_identity() {
    assert_eq!(cover_scale(Size::new(0.0, 100.0), Size::new(800.0, 600.0)), 1.0);
    assert_eq!(cover_scale(Size::new(100.0, 0.0), Size::new(800.0, 600.0)), 1.0);
}

#[test]
fn cover_scale_leaves_no_empty_space() {
    let bg = Size::new(1600.0, 900.0);
    let viewport = Size::new(1000.0, 800.0);
    let scale = cover_scale(bg, viewport);
    assert!(bg.width * scale >= viewport.width);
    assert!(bg.height * scale >= viewport.height);
}

// --- StageTransform ---

#[test]
fn transform_default_is_identity() {
    let t = StageTransform::default();
    assert_eq!(t.scale, 1.0);
}

#[test]
fn covering_floors_collapsed_viewport_at_identity() {
    let t = StageTransform::covering(Size::new(1000.0, 1000.0), Size::new(0.0, 0.0));
    assert_eq!(t.scale, 1.0);
}

#[test]
fn to_screen_scales_point() {
    let t = StageTransform { scale: 2.0 };
    let screen = t.to_screen(Point::new(10.0, 20.0));
    assert!(point_approx_eq(screen, Point::new(20.0, 40.0)));
}

#[test]
fn to_logical_divides_point() {
    let t = StageTransform { scale: 2.0 };
    let logical = t.to_logical(Point::new(20.0, 40.0));
    assert!(point_approx_eq(logical, Point::new(10.0, 20.0)));
}

#[test]
fn round_trip_preserves_point() {
    let t = StageTransform { scale: 1.75 };
    let p = Point::new(333.3, -99.9);
    let back = t.to_logical(t.to_screen(p));
    assert!(point_approx_eq(p, back));
}

#[test]
fn round_trip_fractional_scale() {
    let t = StageTransform { scale: 0.6180339887 };
    let p = Point::new(1234.5, 678.9);
    let back = t.to_screen(t.to_logical(p));
    assert!(point_approx_eq(p, back));
}

#[test]
fn size_to_screen_scales_both_dimensions() {
    let t = StageTransform { scale: 3.0 };
    let s = t.size_to_screen(Size::new(10.0, 20.0));
    assert!(approx_eq(s.width, 30.0));
    assert!(approx_eq(s.height, 60.0));
}

#[test]
fn dist_to_logical_divides() {
    let t = StageTransform { scale: 2.0 };
    assert!(approx_eq(t.dist_to_logical(40.0), 20.0));
}
