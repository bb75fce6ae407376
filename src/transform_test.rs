#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn affine_approx_eq(a: Affine, b: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| approx_eq(*x, *y))
}

#[test]
fn default_is_identity() {
    assert!(affine_approx_eq(Transform::default().to_affine(), Affine::IDENTITY));
}

#[test]
fn at_only_translates() {
    let t = Transform::at(Point::new(5.0, -2.0));
    let p = t.to_affine() * Point::new(1.0, 1.0);
    assert!(approx_eq(p.x, 6.0));
    assert!(approx_eq(p.y, -1.0));
}

#[test]
fn rotation_is_about_local_origin_then_translated() {
    let t = Transform { position: Point::new(10.0, 0.0), scale: Vec2::new(1.0, 1.0), angle: 90.0 };
    // +x in local space points down (+y) after a clockwise quarter turn.
    let p = t.to_affine() * Point::new(1.0, 0.0);
    assert!(approx_eq(p.x, 10.0));
    assert!(approx_eq(p.y, 1.0));
}

#[test]
fn scale_applies_before_rotation() {
    let t = Transform { position: Point::ZERO, scale: Vec2::new(2.0, 3.0), angle: 90.0 };
    let p = t.to_affine() * Point::new(1.0, 1.0);
    // (2, 3) rotated a quarter turn clockwise is (-3, 2).
    assert!(approx_eq(p.x, -3.0));
    assert!(approx_eq(p.y, 2.0));
}

#[test]
fn decompose_recovers_fields() {
    let t = Transform { position: Point::new(12.5, -7.0), scale: Vec2::new(2.0, 2.0), angle: 33.0 };
    let back = Transform::from_affine(t.to_affine());
    assert!(approx_eq(back.position.x, 12.5));
    assert!(approx_eq(back.position.y, -7.0));
    assert!(approx_eq(back.scale.x, 2.0));
    assert!(approx_eq(back.scale.y, 2.0));
    assert!(approx_eq(back.angle, 33.0));
}

#[test]
fn decompose_wraps_large_angles_but_keeps_matrix() {
    let t = Transform { position: Point::new(1.0, 2.0), scale: Vec2::new(1.5, 1.5), angle: 250.0 };
    let back = Transform::from_affine(t.to_affine());
    assert!(approx_eq(back.angle, -110.0));
    assert!(affine_approx_eq(back.to_affine(), t.to_affine()));
}

#[test]
fn decompose_keeps_mirrored_y_axis() {
    let t = Transform { position: Point::ZERO, scale: Vec2::new(1.0, -1.0), angle: 0.0 };
    let back = Transform::from_affine(t.to_affine());
    assert!(approx_eq(back.scale.y, -1.0));
    assert!(affine_approx_eq(back.to_affine(), t.to_affine()));
}

#[test]
fn decompose_composition_of_two_transforms() {
    let parent = Transform { position: Point::new(100.0, 50.0), scale: Vec2::new(1.0, 1.0), angle: 30.0 };
    let child = Transform { position: Point::new(10.0, 5.0), scale: Vec2::new(2.0, 2.0), angle: 15.0 };
    let combined = parent.to_affine() * child.to_affine();
    let flat = Transform::from_affine(combined);
    assert!(approx_eq(flat.angle, 45.0));
    assert!(approx_eq(flat.scale.x, 2.0));
    assert!(affine_approx_eq(flat.to_affine(), combined));
}
