//! Finite line segments

use serde::{Deserialize, Serialize};
use smath_linalg::{scalar, Mat4, Vec3};

/// A segment from `start` to `end`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    pub start: Vec3,
    pub end: Vec3,
}

impl Line3 {
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// True when start and end coincide
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Midpoint of the segment
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Vector from start to end
    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn distance_squared(&self) -> f32 {
        self.start.distance_to_squared(self.end)
    }

    pub fn distance(&self) -> f32 {
        self.start.distance_to(self.end)
    }

    /// Point at parameter `t`: start at 0, end at 1
    pub fn at(&self, t: f32) -> Vec3 {
        self.start + self.delta() * t
    }

    /// [`Line3::at`] writing into `target`
    pub fn at_into(&self, t: f32, target: &mut Vec3) {
        *target = self.at(t);
    }

    /// Parameter of the point on the line closest to `point`
    ///
    /// With `clamp_to_line` the parameter is restricted to the segment. A
    /// degenerate segment has no direction and returns `None`.
    pub fn closest_point_to_point_parameter(&self, point: Vec3, clamp_to_line: bool) -> Option<f32> {
        let start_end = self.delta();
        let start_end2 = start_end.dot(start_end);
        if start_end2 == 0.0 {
            return None;
        }

        let t = start_end.dot(point - self.start) / start_end2;
        Some(if clamp_to_line {
            scalar::clamp(t, 0.0, 1.0)
        } else {
            t
        })
    }

    /// Point on the line closest to `point`
    ///
    /// A degenerate segment returns its start.
    pub fn closest_point_to_point(&self, point: Vec3, clamp_to_line: bool) -> Vec3 {
        match self.closest_point_to_point_parameter(point, clamp_to_line) {
            Some(t) => self.at(t),
            None => self.start,
        }
    }

    /// Transform both endpoints as points
    pub fn apply_mat4(&mut self, m: &Mat4) {
        self.start = self.start.apply_mat4(m);
        self.end = self.end.apply_mat4(m);
    }
}
