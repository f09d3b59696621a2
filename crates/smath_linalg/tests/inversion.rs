use proptest::prelude::*;

use smath_linalg::{MathError, Mat3, Mat4, Quat, SingularPolicy, Vec3};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}

fn affine_strategy() -> impl Strategy<Value = Mat4> {
    (
        prop::array::uniform3(-10.0f32..10.0),
        prop::array::uniform3(-1.0f32..1.0),
        -3.0f32..3.0,
        prop::array::uniform3(0.5f32..2.0),
    )
        .prop_filter_map("axis too short", |(position, axis, angle, scale)| {
            let axis = Vec3::from(axis).try_normalize()?;
            Some(Mat4::compose(
                Vec3::from(position),
                &Quat::from_axis_angle(axis, angle),
                Vec3::from(scale),
            ))
        })
}

proptest! {
    #[test]
    fn mat4_times_inverse_is_identity(m in affine_strategy()) {
        let inv = m.try_inverse().unwrap();
        prop_assert!(max_abs_diff(&(m * inv).elements, &Mat4::IDENTITY.elements) < 1e-3);
        prop_assert!(max_abs_diff(&(inv * m).elements, &Mat4::IDENTITY.elements) < 1e-3);
    }

    #[test]
    fn mat3_times_inverse_is_identity(m in affine_strategy()) {
        let m3 = Mat3::from_mat4(&m);
        let inv = m3.try_inverse().unwrap();
        prop_assert!(max_abs_diff(&(m3 * inv).elements, &Mat3::IDENTITY.elements) < 1e-4);
    }

    #[test]
    fn determinant_of_product(a in affine_strategy(), b in affine_strategy()) {
        let lhs = (a * b).determinant();
        let rhs = a.determinant() * b.determinant();
        prop_assert!((lhs - rhs).abs() <= 1e-3 * rhs.abs().max(1.0));
    }

    #[test]
    fn normal_matrix_preserves_perpendicularity(
        m in affine_strategy(),
        t in prop::array::uniform3(-1.0f32..1.0),
    ) {
        let tangent = Vec3::from(t);
        prop_assume!(tangent.length() > 0.1);

        // Any vector orthogonal to the tangent
        let helper = if tangent.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let normal = tangent.cross(helper).normalized();

        let moved_tangent = tangent.transform_direction(&m);
        let moved_normal = normal.apply_mat3(&Mat3::normal_matrix(&m)).normalized();
        prop_assert!(moved_tangent.dot(moved_normal).abs() < 1e-3);
    }
}

#[test]
fn singular_mat4_permissive_substitutes_identity() {
    init_logging();

    let flat = Mat4::make_scale(1.0, 1.0, 0.0);
    assert_eq!(flat.determinant(), 0.0);
    assert_eq!(flat.inverse(), Mat4::IDENTITY);
    assert_eq!(
        flat.inverse_with(SingularPolicy::Permissive).unwrap(),
        Mat4::IDENTITY
    );
}

#[test]
fn singular_mat4_strict_reports_error() {
    init_logging();

    let flat = Mat4::make_scale(1.0, 1.0, 0.0);
    match flat.inverse_with(SingularPolicy::Strict) {
        Err(MathError::SingularMatrix { determinant }) => assert_eq!(determinant, 0.0),
        other => panic!("expected SingularMatrix, got {:?}", other),
    }
    assert!(flat.try_inverse().is_err());
}

#[test]
fn mat3_with_zero_row_is_singular() {
    init_logging();

    let m = Mat3::from_rows(0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(m.determinant(), 0.0);
    assert_eq!(m.inverse(), Mat3::IDENTITY);
    assert!(matches!(
        m.try_inverse(),
        Err(MathError::SingularMatrix { .. })
    ));
}

#[test]
fn rank_deficient_mat4_is_singular() {
    init_logging();

    // Two identical columns
    let m = Mat4::from_rows(
        1.0, 1.0, 0.0, 0.0, //
        2.0, 2.0, 1.0, 0.0, //
        3.0, 3.0, 0.0, 1.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    assert_eq!(m.determinant(), 0.0);
    assert!(m.try_inverse().is_err());
}
