//! 2D axis-aligned bounding boxes
//!
//! Same emptiness rules as [`crate::Box3`]: empty when any max component is
//! below the matching min, canonically min = +inf and max = -inf.

use serde::{Deserialize, Serialize};
use smath_linalg::Vec2;

/// An axis-aligned rectangle between two corners
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Box2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Box2 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Box2 {
    /// The canonical empty box
    pub const EMPTY: Self = Self {
        min: Vec2::splat(f32::INFINITY),
        max: Vec2::splat(f32::NEG_INFINITY),
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut b = Self::EMPTY;
        for point in points {
            b.expand_by_point(*point);
        }
        b
    }

    pub fn from_center_and_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn make_empty(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Center of the box; an empty box reports the origin
    pub fn center(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    pub fn center_into(&self, target: &mut Vec2) {
        *target = self.center();
    }

    /// Full extents; an empty box reports zero
    pub fn size(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn expand_by_point(&mut self, point: Vec2) {
        self.min = self.min.min_components(point);
        self.max = self.max.max_components(point);
    }

    pub fn expand_by_vector(&mut self, vector: Vec2) {
        self.min -= vector;
        self.max += vector;
    }

    pub fn expand_by_scalar(&mut self, scalar: f32) {
        self.min = self.min.add_scalar(-scalar);
        self.max = self.max.add_scalar(scalar);
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        !(point.x < self.min.x || point.x > self.max.x || point.y < self.min.y || point.y > self.max.y)
    }

    pub fn contains_box(&self, other: &Box2) -> bool {
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
    }

    /// Position of `point` relative to the box: 0 at min, 1 at max on each axis
    pub fn parameter(&self, point: Vec2) -> Vec2 {
        (point - self.min).component_div(self.max - self.min)
    }

    pub fn intersects_box(&self, other: &Box2) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max)
    }

    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        (self.clamp_point(point) - point).length()
    }

    /// Shrink to the overlap with `other`; no overlap leaves the canonical empty box
    pub fn intersect(&mut self, other: &Box2) {
        self.min = self.min.max_components(other.min);
        self.max = self.max.min_components(other.max);

        if self.is_empty() {
            log::debug!("Box2::intersect: no overlap, collapsing to empty box");
            self.make_empty();
        }
    }

    pub fn union(&mut self, other: &Box2) {
        self.min = self.min.min_components(other.min);
        self.max = self.max.max_components(other.max);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.min += offset;
        self.max += offset;
    }
}
