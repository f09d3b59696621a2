//! End-to-end transforms through the re-exported kernel
//!
//! Builds a world matrix from position, rotation and scale, pushes geometry
//! through it, and checks that the bounding volumes follow.

use smath::{
    Box3, Euler, InterleavedBuffer, Line3, Mat3, Mat4, Plane, Quat, RotationOrder, Sphere, Vec3,
};
use std::f32::consts::FRAC_PI_2;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

fn world() -> Mat4 {
    let rotation = Quat::from_euler(&Euler::new(0.0, FRAC_PI_2, 0.0, RotationOrder::XYZ));
    Mat4::compose(Vec3::new(10.0, 0.0, 0.0), &rotation, Vec3::splat(2.0))
}

#[test]
fn compose_then_decompose_recovers_parts() {
    let (position, rotation, scale) = world().decompose();

    assert!(approx(position, Vec3::new(10.0, 0.0, 0.0)));
    assert!(approx(scale, Vec3::splat(2.0)));
    assert!(approx(rotation.rotate(Vec3::X), Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn buffer_and_box_agree_after_transform() {
    let corners = [Vec3::ZERO, Vec3::ONE];
    let mut data = Vec::new();
    for corner in &corners {
        data.extend_from_slice(&corner.to_array());
    }
    let mut buffer = InterleavedBuffer::new(data, 3);

    let m = world();
    m.apply_to_attribute(&mut buffer, 0, 2).unwrap();

    let mut bounds = Box3::from_points(&corners);
    bounds.apply_mat4(&m);
    bounds.expand_by_scalar(1e-4);

    for index in 0..2 {
        let moved = Vec3::from_attribute(&buffer, index).unwrap();
        assert!(bounds.contains_point(moved));
    }
    assert!(approx(bounds.size(), Vec3::splat(2.0 + 2e-4)));
}

#[test]
fn plane_follows_world_matrix() {
    let m = world();
    let normal_matrix = Mat3::normal_matrix(&m);

    let mut floor = Plane::new(Vec3::Y, 0.0);
    floor.apply_mat4(&m, Some(&normal_matrix));

    let point = Vec3::new(3.0, 0.0, -4.0).apply_mat4(&m);
    assert!(floor.distance_to_point(point).abs() < 1e-4);

    let drop = Line3::new(point + Vec3::Y, point - Vec3::Y);
    let hit = floor.intersect_line(&drop).unwrap();
    assert!(approx(hit, point));
}

#[test]
fn sphere_scales_with_largest_axis() {
    let mut s = Sphere::new(Vec3::ZERO, 1.0);
    s.apply_mat4(&(Mat4::make_translation(1.0, 2.0, 3.0) * Mat4::make_scale(1.0, 4.0, 2.0)));

    assert!(approx(s.center, Vec3::new(1.0, 2.0, 3.0)));
    assert!((s.radius - 4.0).abs() < 1e-6);
    assert!(s.bounding_box().contains_point(Vec3::new(1.0, 6.0, 3.0)));
}

#[test]
fn euler_reorder_keeps_orientation() {
    let mut e = Euler::new(0.3, -0.4, 0.5, RotationOrder::XYZ);
    let before = Vec3::new(1.0, 2.0, 3.0).apply_euler(&e);

    e.reorder(RotationOrder::ZYX);
    let after = Vec3::new(1.0, 2.0, 3.0).apply_euler(&e);

    assert_eq!(e.order(), RotationOrder::ZYX);
    assert!(approx(before, after));
}
