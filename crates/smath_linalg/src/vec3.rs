//! 3D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::attribute::BufferAttribute;
use crate::error::{check_range, MathError};
use crate::scalar::clamp_unit;
use crate::{Euler, Mat3, Mat4, Quat};

/// 3D Vector with x, y, z components
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vec3
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `value`
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value, z: value }
    }

    /// Read a component by index (0 = x, 1 = y, 2 = z)
    pub fn component(&self, index: usize) -> Result<f32, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::IndexOutOfRange { index, len: 3 }),
        }
    }

    /// Write a component by index (0 = x, 1 = y, 2 = z)
    pub fn set_component(&mut self, index: usize, value: f32) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(MathError::IndexOutOfRange { index, len: 3 }),
        }
        Ok(())
    }

    /// Read three consecutive values starting at `offset`
    pub fn from_array(array: &[f32], offset: usize) -> Result<Self, MathError> {
        check_range(offset, 3, array.len())?;
        Ok(Self::new(array[offset], array[offset + 1], array[offset + 2]))
    }

    /// Write the components into `array` starting at `offset`
    pub fn write_to_slice(&self, array: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_range(offset, 3, array.len())?;
        array[offset] = self.x;
        array[offset + 1] = self.y;
        array[offset + 2] = self.z;
        Ok(())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Read element `index` of a buffer attribute
    pub fn from_attribute<A: BufferAttribute + ?Sized>(
        attribute: &A,
        index: usize,
    ) -> Result<Self, MathError> {
        Ok(Self::new(
            attribute.get_component(index, 0)?,
            attribute.get_component(index, 1)?,
            attribute.get_component(index, 2)?,
        ))
    }

    /// Write into element `index` of a buffer attribute
    pub fn write_to_attribute<A: BufferAttribute + ?Sized>(
        &self,
        attribute: &mut A,
        index: usize,
    ) -> Result<(), MathError> {
        attribute.set_component(index, 0, self.x)?;
        attribute.set_component(index, 1, self.y)?;
        attribute.set_component(index, 2, self.z)
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed)
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
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

    /// Sum of absolute components
    #[inline]
    pub fn length_manhattan(self) -> f32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Normalize to unit length; the zero vector stays zero
    #[inline]
    pub fn normalized(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Normalize to unit length, or `None` for a zero-length vector
    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(self * (1.0 / len))
        } else {
            None
        }
    }

    /// Same direction, new length
    pub fn with_length(self, length: f32) -> Self {
        self.normalized() * length
    }

    /// Scale so the length lies in `[min, max]`; the zero vector is returned as is
    pub fn clamp_length(self, min: f32, max: f32) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        self * (len.clamp(min, max) / len)
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Clamp each component between corresponding min and max values
    ///
    /// Assumes `min <= max` componentwise.
    #[inline]
    pub fn clamp_components(self, min: Self, max: Self) -> Self {
        Self::new(
            min.x.max(max.x.min(self.x)),
            min.y.max(max.y.min(self.y)),
            min.z.max(max.z.min(self.z)),
        )
    }

    /// Clamp every component to `[min, max]`
    #[inline]
    pub fn clamp_scalar(self, min: f32, max: f32) -> Self {
        self.clamp_components(Self::splat(min), Self::splat(max))
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    #[inline]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round())
    }

    /// Round each component toward zero
    #[inline]
    pub fn round_to_zero(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc(), self.z.trunc())
    }

    /// Component-wise multiplication (Hadamard product)
    #[inline]
    pub fn component_mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise division
    #[inline]
    pub fn component_div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    /// Add `scalar` to every component
    #[inline]
    pub fn add_scalar(self, scalar: f32) -> Self {
        Self::new(self.x + scalar, self.y + scalar, self.z + scalar)
    }

    /// `self + other * scale`
    #[inline]
    pub fn add_scaled(self, other: Self, scale: f32) -> Self {
        self + other * scale
    }

    #[inline]
    pub fn distance_to_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    #[inline]
    pub fn distance_to(self, other: Self) -> f32 {
        self.distance_to_squared(other).sqrt()
    }

    /// Angle between two vectors in radians, in `[0, PI]`
    ///
    /// The cosine is clamped before `acos`, so near-parallel inputs give 0 or PI
    /// rather than NaN. A zero-length operand yields PI/2.
    pub fn angle_to(self, other: Self) -> f32 {
        let denominator = self.length() * other.length();
        if denominator == 0.0 {
            return std::f32::consts::FRAC_PI_2;
        }
        clamp_unit(self.dot(other) / denominator).acos()
    }

    /// Projection of `self` onto `onto`; zero when `onto` has zero length
    pub fn project_on_vector(self, onto: Self) -> Self {
        let denominator = onto.length_squared();
        if denominator == 0.0 {
            return Self::ZERO;
        }
        onto * (onto.dot(self) / denominator)
    }

    /// Remove the component along `plane_normal`
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project_on_vector(plane_normal)
    }

    /// Reflect off the plane orthogonal to the unit vector `normal`
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Linear map through a 3x3 matrix
    pub fn apply_mat3(self, m: &Mat3) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[3] * self.y + e[6] * self.z,
            e[1] * self.x + e[4] * self.y + e[7] * self.z,
            e[2] * self.x + e[5] * self.y + e[8] * self.z,
        )
    }

    /// Affine transform as a point (implicit w = 1, translation applied)
    pub fn apply_mat4(self, m: &Mat4) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[4] * self.y + e[8] * self.z + e[12],
            e[1] * self.x + e[5] * self.y + e[9] * self.z + e[13],
            e[2] * self.x + e[6] * self.y + e[10] * self.z + e[14],
        )
    }

    /// Transform through a projective matrix and divide by the resulting w
    ///
    /// A resulting w of zero produces infinite or NaN components; no check is made.
    pub fn apply_projection(self, m: &Mat4) -> Self {
        let e = &m.elements;
        let d = 1.0 / (e[3] * self.x + e[7] * self.y + e[11] * self.z + e[15]);
        Self::new(
            (e[0] * self.x + e[4] * self.y + e[8] * self.z + e[12]) * d,
            (e[1] * self.x + e[5] * self.y + e[9] * self.z + e[13]) * d,
            (e[2] * self.x + e[6] * self.y + e[10] * self.z + e[14]) * d,
        )
    }

    /// Transform as a direction (upper 3x3 only), then normalize
    pub fn transform_direction(self, m: &Mat4) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[4] * self.y + e[8] * self.z,
            e[1] * self.x + e[5] * self.y + e[9] * self.z,
            e[2] * self.x + e[6] * self.y + e[10] * self.z,
        )
        .normalized()
    }

    /// Rotate by a quaternion: q * v * q^-1
    pub fn apply_quat(self, q: &Quat) -> Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let (qx, qy, qz, qw) = (q.x, q.y, q.z, q.w);

        let ix = qw * x + qy * z - qz * y;
        let iy = qw * y + qz * x - qx * z;
        let iz = qw * z + qx * y - qy * x;
        let iw = -qx * x - qy * y - qz * z;

        Self::new(
            ix * qw + iw * -qx + iy * -qz - iz * -qy,
            iy * qw + iw * -qy + iz * -qx - ix * -qz,
            iz * qw + iw * -qz + ix * -qy - iy * -qx,
        )
    }

    /// Rotate by an Euler rotation
    pub fn apply_euler(self, euler: &Euler) -> Self {
        self.apply_quat(&Quat::from_euler(euler))
    }

    /// Rotate about a unit `axis` by `angle` radians
    pub fn apply_axis_angle(self, axis: Self, angle: f32) -> Self {
        self.apply_quat(&Quat::from_axis_angle(axis, angle))
    }

    /// Translation column of an affine matrix
    pub fn from_matrix_position(m: &Mat4) -> Self {
        Self::from_matrix_column(m, 3)
    }

    /// Per-axis scale of an affine matrix (lengths of the basis columns)
    pub fn from_matrix_scale(m: &Mat4) -> Self {
        Self::new(
            Self::from_matrix_column(m, 0).length(),
            Self::from_matrix_column(m, 1).length(),
            Self::from_matrix_column(m, 2).length(),
        )
    }

    /// First three rows of column `index` (0..=3) of a 4x4 matrix
    ///
    /// # Panics
    /// Panics if `index > 3`.
    pub fn from_matrix_column(m: &Mat4, index: usize) -> Self {
        debug_assert!(index < 4, "Vec3::from_matrix_column: column {} out of range 0..4", index);
        let e = &m.elements;
        let base = index * 4;
        Self::new(e[base], e[base + 1], e[base + 2])
    }

    /// Point from spherical coordinates: polar angle `phi` from +Y, azimuth `theta` around +Y from +Z
    pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Self {
        let sin_phi_radius = phi.sin() * radius;
        Self::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        )
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

// Operator overloads

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
