//! Bounding spheres

use serde::{Deserialize, Serialize};
use smath_linalg::{Mat4, Vec3};

use crate::{Box3, Plane};

/// A sphere defined by center and radius; a radius of zero or less is empty
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere at the given center with the given radius
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere around `center` containing every point
    ///
    /// Without an explicit center the center of the points' bounding box is
    /// used. This is a cheap fit, not the minimal enclosing sphere.
    pub fn from_points(points: &[Vec3], center: Option<Vec3>) -> Self {
        let center = center.unwrap_or_else(|| Box3::from_points(points).center());

        let max_radius_sq = points
            .iter()
            .map(|p| center.distance_to_squared(*p))
            .fold(0.0f32, f32::max);

        Self::new(center, max_radius_sq.sqrt())
    }

    pub fn is_empty(&self) -> bool {
        self.radius <= 0.0
    }

    /// Check if a point is inside or on the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.distance_to_squared(self.center) <= self.radius * self.radius
    }

    /// Signed distance from the surface; negative inside
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        point.distance_to(self.center) - self.radius
    }

    pub fn intersects_sphere(&self, other: &Sphere) -> bool {
        let radius_sum = self.radius + other.radius;
        other.center.distance_to_squared(self.center) <= radius_sum * radius_sum
    }

    pub fn intersects_box(&self, b: &Box3) -> bool {
        b.intersects_sphere(self)
    }

    /// Whether the plane passes within `radius` of the center
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        plane.distance_to_point(self.center).abs() <= self.radius
    }

    /// Closest point inside or on the sphere to `point`
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        if self.center.distance_to_squared(point) > self.radius * self.radius {
            self.center + (point - self.center).normalized() * self.radius
        } else {
            point
        }
    }

    /// Axis-aligned box around the sphere
    pub fn bounding_box(&self) -> Box3 {
        let mut b = Box3::new(self.center, self.center);
        b.expand_by_scalar(self.radius);
        b
    }

    /// [`Sphere::bounding_box`] writing into `target`
    pub fn bounding_box_into(&self, target: &mut Box3) {
        *target = self.bounding_box();
    }

    /// Transform the center as a point; the radius grows by the largest axis scale
    pub fn apply_mat4(&mut self, m: &Mat4) {
        self.center = self.center.apply_mat4(m);
        self.radius *= m.max_scale_on_axis();
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.center += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_from_points_box_center() {
        let points = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let s = Sphere::from_points(&points, None);
        assert_eq!(s.center, Vec3::new(1.0, 0.5, 0.0));
        assert!(approx_eq(s.radius, (4.0f32 + 0.25).sqrt()));
        assert!(points.iter().all(|p| s.distance_to_point(*p) <= EPSILON));
    }

    #[test]
    fn test_from_points_given_center() {
        let points = [Vec3::new(3.0, 4.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let s = Sphere::from_points(&points, Some(Vec3::ZERO));
        assert_eq!(s, Sphere::new(Vec3::ZERO, 5.0));
    }

    #[test]
    fn test_from_no_points_is_empty() {
        assert!(Sphere::from_points(&[], None).is_empty());
    }

    #[test]
    fn test_contains_and_distance() {
        let s = Sphere::new(Vec3::ZERO, 2.0);
        assert!(s.contains_point(Vec3::new(0.0, 2.0, 0.0)));
        assert!(!s.contains_point(Vec3::new(0.0, 2.1, 0.0)));
        assert_eq!(s.distance_to_point(Vec3::new(5.0, 0.0, 0.0)), 3.0);
        assert_eq!(s.distance_to_point(Vec3::ZERO), -2.0);
    }

    #[test]
    fn test_intersects_sphere() {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        assert!(a.intersects_sphere(&Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0)));
        assert!(!a.intersects_sphere(&Sphere::new(Vec3::new(2.1, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn test_intersects_plane_uses_signed_distance() {
        let s = Sphere::new(Vec3::new(0.0, 3.0, 0.0), 1.0);
        // y = 2.5
        assert!(s.intersects_plane(&Plane::new(Vec3::Y, -2.5)));
        // y = 1
        assert!(!s.intersects_plane(&Plane::new(Vec3::Y, -1.0)));
        // y = -3 must not match just because |constant| equals the center height
        assert!(!s.intersects_plane(&Plane::new(Vec3::Y, 3.0)));
        // Flipped normal, y = 2.5
        assert!(s.intersects_plane(&Plane::new(-Vec3::Y, 2.5)));
    }

    #[test]
    fn test_clamp_point() {
        let s = Sphere::new(Vec3::ONE, 1.0);
        assert_eq!(s.clamp_point(Vec3::new(1.0, 1.0, 5.0)), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(s.clamp_point(Vec3::new(1.0, 1.5, 1.0)), Vec3::new(1.0, 1.5, 1.0));
    }

    #[test]
    fn test_bounding_box() {
        let s = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let b = s.bounding_box();
        assert_eq!(b, Box3::new(Vec3::new(0.5, 1.5, 2.5), Vec3::new(1.5, 2.5, 3.5)));

        let mut target = Box3::EMPTY;
        s.bounding_box_into(&mut target);
        assert_eq!(target, b);
    }

    #[test]
    fn test_apply_mat4() {
        let mut s = Sphere::new(Vec3::X, 1.0);
        let m = Mat4::make_translation(0.0, 1.0, 0.0) * Mat4::make_scale(1.0, 3.0, 2.0);
        s.apply_mat4(&m);
        assert_eq!(s.center, Vec3::new(1.0, 1.0, 0.0));
        assert!(approx_eq(s.radius, 3.0));
    }

    #[test]
    fn test_translate() {
        let mut s = Sphere::new(Vec3::ZERO, 1.0);
        s.translate(Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(s.center, Vec3::new(0.0, 0.0, 4.0));
    }
}
