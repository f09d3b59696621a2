//! Quaternion rotations
//!
//! A quaternion (x, y, z, w) represents a rotation when it has unit length.
//! Unit length is expected but not enforced; `normalize` restores it after
//! accumulated drift.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::attribute::BufferAttribute;
use crate::error::{check_range, MathError};
use crate::euler::{Euler, RotationOrder};
use crate::scalar::clamp_unit;
use crate::{Mat4, Vec3};

/// Rotation quaternion
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_array(array: &[f32], offset: usize) -> Result<Self, MathError> {
        check_range(offset, 4, array.len())?;
        let a = &array[offset..offset + 4];
        Ok(Self::new(a[0], a[1], a[2], a[3]))
    }

    pub fn write_to_slice(&self, array: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_range(offset, 4, array.len())?;
        array[offset..offset + 4].copy_from_slice(&self.to_array());
        Ok(())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Read element `index` of a four-component attribute
    pub fn from_attribute<A: BufferAttribute + ?Sized>(
        attribute: &A,
        index: usize,
    ) -> Result<Self, MathError> {
        Ok(Self::new(
            attribute.get_component(index, 0)?,
            attribute.get_component(index, 1)?,
            attribute.get_component(index, 2)?,
            attribute.get_component(index, 3)?,
        ))
    }

    /// Rotation of `angle` radians about a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Rotation equivalent to the Euler angles in their axis order
    pub fn from_euler(euler: &Euler) -> Self {
        let (s1, c1) = (euler.x() * 0.5).sin_cos();
        let (s2, c2) = (euler.y() * 0.5).sin_cos();
        let (s3, c3) = (euler.z() * 0.5).sin_cos();

        // Sign pattern on the cross terms for (x, y, z, w)
        let signs: [f32; 4] = match euler.order() {
            RotationOrder::XYZ => [1.0, -1.0, 1.0, -1.0],
            RotationOrder::YXZ => [1.0, -1.0, -1.0, 1.0],
            RotationOrder::ZXY => [-1.0, 1.0, 1.0, -1.0],
            RotationOrder::ZYX => [-1.0, 1.0, -1.0, 1.0],
            RotationOrder::YZX => [1.0, 1.0, -1.0, -1.0],
            RotationOrder::XZY => [-1.0, -1.0, 1.0, 1.0],
        };

        Self::new(
            s1 * c2 * c3 + signs[0] * c1 * s2 * s3,
            c1 * s2 * c3 + signs[1] * s1 * c2 * s3,
            c1 * c2 * s3 + signs[2] * s1 * s2 * c3,
            c1 * c2 * c3 + signs[3] * s1 * s2 * s3,
        )
    }

    /// Extract the rotation from the upper 3x3 of a matrix
    ///
    /// The upper 3x3 must be a pure rotation (unscaled).
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(
                (m32 - m23) * s,
                (m13 - m31) * s,
                (m21 - m12) * s,
                0.25 / s,
            )
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(
                0.25 * s,
                (m12 + m21) / s,
                (m13 + m31) / s,
                (m32 - m23) / s,
            )
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new(
                (m12 + m21) / s,
                0.25 * s,
                (m23 + m32) / s,
                (m13 - m31) / s,
            )
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new(
                (m13 + m31) / s,
                (m23 + m32) / s,
                0.25 * s,
                (m21 - m12) / s,
            )
        }
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`
    ///
    /// Antiparallel inputs rotate half a turn about an arbitrary perpendicular axis.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        const EPS: f32 = 0.000001;

        let r = from.dot(to) + 1.0;

        let q = if r < EPS {
            let axis = if from.x.abs() > from.z.abs() {
                Vec3::new(-from.y, from.x, 0.0)
            } else {
                Vec3::new(0.0, -from.z, from.y)
            };
            Self::new(axis.x, axis.y, axis.z, 0.0)
        } else {
            let axis = from.cross(to);
            Self::new(axis.x, axis.y, axis.z, r)
        };

        q.normalize()
    }

    #[inline]
    pub fn dot(&self, other: &Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Rescale to unit length; a zero quaternion becomes the identity
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Negate the vector part
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse; equal to the conjugate for unit quaternions
    ///
    /// A zero quaternion has no inverse and yields the identity.
    pub fn inverse(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq == 0.0 {
            return Self::IDENTITY;
        }
        let c = self.conjugate();
        let inv = 1.0 / len_sq;
        Self::new(c.x * inv, c.y * inv, c.z * inv, c.w * inv)
    }

    /// Hamilton product `a * b`: the composed rotation applies `b` first, then `a`
    pub fn mul_quat(a: &Quat, b: &Quat) -> Self {
        Self::new(
            a.x * b.w + a.w * b.x + a.y * b.z - a.z * b.y,
            a.y * b.w + a.w * b.y + a.z * b.x - a.x * b.z,
            a.z * b.w + a.w * b.z + a.x * b.y - a.y * b.x,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    /// `self * other`
    #[inline]
    pub fn multiply(&self, other: &Quat) -> Self {
        Self::mul_quat(self, other)
    }

    /// `other * self`
    #[inline]
    pub fn premultiply(&self, other: &Quat) -> Self {
        Self::mul_quat(other, self)
    }

    /// Spherical interpolation along the shorter arc
    ///
    /// Nearly identical rotations fall back to a linear blend.
    pub fn slerp(&self, other: &Quat, t: f32) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }

        let mut cos_half_theta = self.dot(other);
        let target = if cos_half_theta < 0.0 {
            cos_half_theta = -cos_half_theta;
            Self::new(-other.x, -other.y, -other.z, -other.w)
        } else {
            *other
        };

        if cos_half_theta >= 1.0 {
            return *self;
        }

        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        if sin_half_theta.abs() < 0.001 {
            return Self::new(
                0.5 * (self.x + target.x),
                0.5 * (self.y + target.y),
                0.5 * (self.z + target.z),
                0.5 * (self.w + target.w),
            );
        }

        let half_theta = sin_half_theta.atan2(cos_half_theta);
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            self.x * ratio_a + target.x * ratio_b,
            self.y * ratio_a + target.y * ratio_b,
            self.z * ratio_a + target.z * ratio_b,
            self.w * ratio_a + target.w * ratio_b,
        )
    }

    /// Angle in radians between two rotations
    ///
    /// The dot product is clamped to [-1, 1], so the result is never NaN for
    /// unit inputs that drifted slightly.
    pub fn angle_to(&self, other: &Quat) -> f32 {
        2.0 * clamp_unit(self.dot(other)).abs().acos()
    }

    /// Rotate a vector
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        v.apply_quat(self)
    }
}

impl std::ops::Mul for Quat {
    type Output = Quat;
    #[inline]
    fn mul(self, rhs: Quat) -> Quat {
        Quat::mul_quat(&self, &rhs)
    }
}

impl std::ops::Mul<Vec3> for Quat {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.apply_quat(&self)
    }
}
