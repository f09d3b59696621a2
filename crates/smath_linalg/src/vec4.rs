//! 4D Vector type
//!
//! Homogeneous coordinates and RGBA-style quadruples; the w component is the
//! homogeneous weight when transformed by a [`Mat4`].

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::attribute::BufferAttribute;
use crate::error::{check_range, MathError};
use crate::{Mat4, Vec3};

/// 4D Vector with x, y, z, w components
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extend a 3D vector with the given w
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drop the w component
    #[inline]
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Read a component by index (0 = x .. 3 = w)
    pub fn component(&self, index: usize) -> Result<f32, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::IndexOutOfRange { index, len: 4 }),
        }
    }

    /// Write a component by index (0 = x .. 3 = w)
    pub fn set_component(&mut self, index: usize, value: f32) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(MathError::IndexOutOfRange { index, len: 4 }),
        }
        Ok(())
    }

    pub fn from_array(array: &[f32], offset: usize) -> Result<Self, MathError> {
        check_range(offset, 4, array.len())?;
        Ok(Self::new(
            array[offset],
            array[offset + 1],
            array[offset + 2],
            array[offset + 3],
        ))
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

    pub fn write_to_attribute<A: BufferAttribute + ?Sized>(
        &self,
        attribute: &mut A,
        index: usize,
    ) -> Result<(), MathError> {
        attribute.set_component(index, 0, self.x)?;
        attribute.set_component(index, 1, self.y)?;
        attribute.set_component(index, 2, self.z)?;
        attribute.set_component(index, 3, self.w)
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
            self.w.min(other.w),
        )
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
            self.w.max(other.w),
        )
    }

    /// Full homogeneous transform: `M * v`
    pub fn apply_mat4(self, m: &Mat4) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[4] * self.y + e[8] * self.z + e[12] * self.w,
            e[1] * self.x + e[5] * self.y + e[9] * self.z + e[13] * self.w,
            e[2] * self.x + e[6] * self.y + e[10] * self.z + e[14] * self.w,
            e[3] * self.x + e[7] * self.y + e[11] * self.z + e[15] * self.w,
        )
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

// Operator overloads

impl std::ops::Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl std::ops::Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl std::ops::Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }
}

impl std::ops::Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(5.0, 6.0, 7.0, 8.0);
        // 1*5 + 2*6 + 3*7 + 4*8 = 5 + 12 + 21 + 32 = 70
        assert_eq!(a.dot(b), 70.0);
    }

    #[test]
    fn test_component_out_of_range() {
        let mut v = Vec4::W;
        assert_eq!(v.component(3).unwrap(), 1.0);
        assert_eq!(v.set_component(4, 0.0), Err(MathError::IndexOutOfRange { index: 4, len: 4 }));
    }

    #[test]
    fn test_apply_mat4_homogeneous() {
        let m = Mat4::make_translation(1.0, 2.0, 3.0);
        // Points pick up translation, directions don't
        assert_eq!(Vec4::W.apply_mat4(&m), Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(Vec4::X.apply_mat4(&m), Vec4::X);
    }

    #[test]
    fn test_truncate_and_extend() {
        let v = Vec4::from_vec3(Vec3::new(1.0, 2.0, 3.0), 1.0);
        assert_eq!(v.truncate(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.w, 1.0);
    }

    #[test]
    fn test_array_round_trip() {
        let mut buffer = [0.0f32; 6];
        Vec4::new(1.0, 2.0, 3.0, 4.0).write_to_slice(&mut buffer, 2).unwrap();
        assert_eq!(Vec4::from_array(&buffer, 2).unwrap(), Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert!(Vec4::from_array(&buffer, 3).is_err());
    }

    #[test]
    fn test_lerp() {
        let a = Vec4::ZERO;
        let b = Vec4::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(a.lerp(b, 0.5), Vec4::new(5.0, 5.0, 5.0, 5.0));
    }
}
