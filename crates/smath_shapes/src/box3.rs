//! 3D axis-aligned bounding boxes
//!
//! A box is empty when any max component is below the matching min component.
//! The canonical empty box (`Box3::EMPTY`, also the `Default`) has min at +inf
//! and max at -inf, so expanding it by any point yields that point.

use serde::{Deserialize, Serialize};
use smath_linalg::{Mat4, Vec3};

use crate::{Plane, Sphere};

/// An axis-aligned box between two corners
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Default for Box3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Box3 {
    /// The canonical empty box
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from min and max corners
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut b = Self::EMPTY;
        for point in points {
            b.expand_by_point(*point);
        }
        b
    }

    /// Smallest box containing the interleaved xyz points of `array`
    ///
    /// A trailing partial triplet is ignored.
    pub fn from_array(array: &[f32]) -> Self {
        let mut b = Self::EMPTY;
        for chunk in array.chunks_exact(3) {
            b.expand_by_point(Vec3::new(chunk[0], chunk[1], chunk[2]));
        }
        b
    }

    /// Create a box centered at `center` with full extents `size`
    pub fn from_center_and_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Reset to the canonical empty box
    pub fn make_empty(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Center of the box; an empty box reports the origin
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// [`Box3::center`] writing into `target`
    pub fn center_into(&self, target: &mut Vec3) {
        *target = self.center();
    }

    /// Full extents; an empty box reports zero
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn expand_by_point(&mut self, point: Vec3) {
        self.min = self.min.min_components(point);
        self.max = self.max.max_components(point);
    }

    /// Grow by `vector` on each side
    pub fn expand_by_vector(&mut self, vector: Vec3) {
        self.min -= vector;
        self.max += vector;
    }

    /// Grow by `scalar` on each side of every axis
    pub fn expand_by_scalar(&mut self, scalar: f32) {
        self.min = self.min.add_scalar(-scalar);
        self.max = self.max.add_scalar(scalar);
    }

    /// Whether `point` is inside or on the boundary
    pub fn contains_point(&self, point: Vec3) -> bool {
        !(point.x < self.min.x
            || point.x > self.max.x
            || point.y < self.min.y
            || point.y > self.max.y
            || point.z < self.min.z
            || point.z > self.max.z)
    }

    /// Whether `other` lies entirely inside this box
    pub fn contains_box(&self, other: &Box3) -> bool {
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
            && self.min.z <= other.min.z
            && other.max.z <= self.max.z
    }

    /// Position of `point` relative to the box: 0 at min, 1 at max on each axis
    ///
    /// A zero-size axis divides by zero and yields an infinite or NaN component.
    pub fn parameter(&self, point: Vec3) -> Vec3 {
        (point - self.min).component_div(self.max - self.min)
    }

    /// Whether the boxes overlap or touch
    pub fn intersects_box(&self, other: &Box3) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        let closest = self.clamp_point(sphere.center);
        closest.distance_to_squared(sphere.center) <= sphere.radius * sphere.radius
    }

    /// Whether the plane passes through the box
    ///
    /// The extreme values of `normal . p` over the box are compared against
    /// `-constant`; the plane cuts the box when that value lies between them.
    /// Points on the plane satisfy `normal . p = -constant`, so comparing
    /// against `constant` itself would test the mirrored plane.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let n = plane.normal;
        let mut min;
        let mut max;

        if n.x > 0.0 {
            min = n.x * self.min.x;
            max = n.x * self.max.x;
        } else {
            min = n.x * self.max.x;
            max = n.x * self.min.x;
        }

        if n.y > 0.0 {
            min += n.y * self.min.y;
            max += n.y * self.max.y;
        } else {
            min += n.y * self.max.y;
            max += n.y * self.min.y;
        }

        if n.z > 0.0 {
            min += n.z * self.min.z;
            max += n.z * self.max.z;
        } else {
            min += n.z * self.max.z;
            max += n.z * self.min.z;
        }

        let offset = -plane.constant;
        min <= offset && max >= offset
    }

    /// Closest point inside or on the box to `point`
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        point.clamp_components(self.min, self.max)
    }

    /// Distance from `point` to the box; zero inside
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        (self.clamp_point(point) - point).length()
    }

    /// Sphere through the corners, centered on the box
    ///
    /// An empty box gives an empty sphere at the origin.
    pub fn bounding_sphere(&self) -> Sphere {
        if self.is_empty() {
            return Sphere::new(Vec3::ZERO, 0.0);
        }
        Sphere::new(self.center(), self.size().length() * 0.5)
    }

    /// [`Box3::bounding_sphere`] writing into `target`
    pub fn bounding_sphere_into(&self, target: &mut Sphere) {
        *target = self.bounding_sphere();
    }

    /// Shrink to the overlap with `other`; no overlap leaves the canonical empty box
    pub fn intersect(&mut self, other: &Box3) {
        self.min = self.min.max_components(other.min);
        self.max = self.max.min_components(other.max);

        if self.is_empty() {
            log::debug!("Box3::intersect: no overlap, collapsing to empty box");
            self.make_empty();
        }
    }

    /// Grow to also contain `other`
    pub fn union(&mut self, other: &Box3) {
        self.min = self.min.min_components(other.min);
        self.max = self.max.max_components(other.max);
    }

    /// Replace with the box around the eight transformed corners
    ///
    /// An empty box stays empty.
    pub fn apply_mat4(&mut self, m: &Mat4) {
        if self.is_empty() {
            return;
        }

        let (lo, hi) = (self.min, self.max);
        let corners = [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ];

        self.make_empty();
        for corner in corners.iter() {
            self.expand_by_point(corner.apply_mat4(m));
        }
    }

    /// Translate the box by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        self.min += offset;
        self.max += offset;
    }
}
