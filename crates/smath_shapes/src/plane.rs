//! Infinite planes in Hessian normal form
//!
//! A plane is a unit normal plus a constant, with `normal . p + constant == 0`
//! for every point `p` on the plane. Points with a positive signed distance lie
//! on the side the normal points to.

use serde::{Deserialize, Serialize};
use smath_linalg::{Mat3, Mat4, Vec3};

use crate::{Box3, Line3, Sphere};

/// An infinite plane: `normal . p + constant = 0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal pointing to the positive side
    pub normal: Vec3,
    /// Negated distance from the origin along the normal
    pub constant: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vec3::X, 0.0)
    }
}

impl Plane {
    /// Create a plane from a normal and constant, taken as given
    pub const fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    /// Create a plane from the four coefficients of `ax + by + cz + d = 0`
    pub const fn from_components(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::new(Vec3::new(x, y, z), w)
    }

    /// Create a plane through `point` with the given unit normal
    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        Self::new(normal, -point.dot(normal))
    }

    /// Create the plane through three points, wound counter-clockwise around the normal
    ///
    /// Collinear points give a zero normal.
    pub fn from_coplanar_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (c - b).cross(a - b).normalized();
        Self::from_normal_and_coplanar_point(normal, a)
    }

    /// Rescale normal and constant so the normal has unit length
    ///
    /// A zero normal describes no plane and is left unchanged.
    pub fn normalize(&mut self) {
        let length = self.normal.length();
        if length > 0.0 {
            let inverse = 1.0 / length;
            self.normal *= inverse;
            self.constant *= inverse;
        }
    }

    /// Flip the plane to face the other way
    pub fn negate(&mut self) {
        self.normal = -self.normal;
        self.constant = -self.constant;
    }

    /// Signed distance from the plane to `point`
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Signed distance from the plane to the surface of `sphere`
    pub fn distance_to_sphere(&self, sphere: &Sphere) -> f32 {
        self.distance_to_point(sphere.center) - sphere.radius
    }

    /// Closest point on the plane to `point`
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.ortho_point(point)
    }

    /// Offset from the plane to `point` along the normal
    pub fn ortho_point(&self, point: Vec3) -> Vec3 {
        self.normal * self.distance_to_point(point)
    }

    /// Point where the segment `line` crosses the plane
    ///
    /// A segment parallel to the plane returns its start when the start lies on
    /// the plane and `None` otherwise. Crossings outside the segment return `None`.
    pub fn intersect_line(&self, line: &Line3) -> Option<Vec3> {
        let direction = line.delta();
        let denominator = self.normal.dot(direction);

        if denominator == 0.0 {
            if self.distance_to_point(line.start) == 0.0 {
                return Some(line.start);
            }
            return None;
        }

        let t = -(line.start.dot(self.normal) + self.constant) / denominator;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some(line.start + direction * t)
    }

    /// [`Plane::intersect_line`] writing into `target`; returns whether a point was written
    pub fn intersect_line_into(&self, line: &Line3, target: &mut Vec3) -> bool {
        match self.intersect_line(line) {
            Some(point) => {
                *target = point;
                true
            }
            None => false,
        }
    }

    /// Whether the segment's endpoints lie strictly on opposite sides
    ///
    /// Endpoints touching the plane do not count.
    pub fn intersects_line(&self, line: &Line3) -> bool {
        let start = self.distance_to_point(line.start);
        let end = self.distance_to_point(line.end);
        (start < 0.0 && end > 0.0) || (end < 0.0 && start > 0.0)
    }

    pub fn intersects_box(&self, b: &Box3) -> bool {
        b.intersects_plane(self)
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersects_plane(self)
    }

    /// The point on the plane closest to the origin
    pub fn coplanar_point(&self) -> Vec3 {
        self.normal * -self.constant
    }

    /// Transform the plane by an affine matrix
    ///
    /// The normal is carried by the normal matrix of `m`; pass a precomputed
    /// one to skip the inversion.
    pub fn apply_mat4(&mut self, m: &Mat4, normal_matrix: Option<&Mat3>) {
        let reference = self.coplanar_point().apply_mat4(m);
        let normal_matrix = match normal_matrix {
            Some(nm) => *nm,
            None => Mat3::normal_matrix(m),
        };

        self.normal = self.normal.apply_mat3(&normal_matrix).normalized();
        self.constant = -reference.dot(self.normal);
    }

    /// Move the plane by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        self.constant -= offset.dot(self.normal);
    }
}
