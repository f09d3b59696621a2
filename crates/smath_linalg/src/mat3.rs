//! 3x3 Matrix for linear transforms and normal matrices
//!
//! Storage is column-major: element `[col * 3 + row]`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::attribute::BufferAttribute;
use crate::error::{check_range, check_strided_range, MathError, SingularPolicy};
use crate::{Mat4, Vec3};

/// 3x3 matrix (column-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    pub elements: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    #[inline]
    pub const fn new(elements: [f32; 9]) -> Self {
        Self { elements }
    }

    /// Build from arguments given in row-major reading order
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn from_rows(
        n11: f32, n12: f32, n13: f32,
        n21: f32, n22: f32, n23: f32,
        n31: f32, n32: f32, n33: f32,
    ) -> Self {
        Self {
            elements: [
                n11, n21, n31,
                n12, n22, n32,
                n13, n23, n33,
            ],
        }
    }

    /// Overwrite every element, arguments in row-major reading order
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        n11: f32,
        n12: f32,
        n13: f32,
        n21: f32,
        n22: f32,
        n23: f32,
        n31: f32,
        n32: f32,
        n33: f32,
    ) {
        *self = Self::from_rows(n11, n12, n13, n21, n22, n23, n31, n32, n33);
    }

    pub fn identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Upper-left 3x3 of a 4x4 matrix
    #[rustfmt::skip]
    pub fn from_mat4(m: &Mat4) -> Self {
        let me = &m.elements;
        Self::from_rows(
            me[0], me[4], me[8],
            me[1], me[5], me[9],
            me[2], me[6], me[10],
        )
    }

    pub fn from_array(array: &[f32], offset: usize) -> Result<Self, MathError> {
        check_range(offset, 9, array.len())?;
        let mut elements = [0.0; 9];
        elements.copy_from_slice(&array[offset..offset + 9]);
        Ok(Self { elements })
    }

    pub fn write_to_slice(&self, array: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_range(offset, 9, array.len())?;
        array[offset..offset + 9].copy_from_slice(&self.elements);
        Ok(())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 9] {
        self.elements
    }

    /// Write the transpose into `array` without modifying `self`
    pub fn transpose_into_array(&self, array: &mut [f32]) -> Result<(), MathError> {
        self.transpose().write_to_slice(array, 0)
    }

    pub fn multiply_scalar(&self, s: f32) -> Self {
        let mut m = *self;
        for e in m.elements.iter_mut() {
            *e *= s;
        }
        m
    }

    /// result = a * b (applies b first, then a)
    #[allow(clippy::needless_range_loop)]
    pub fn mul_mat(a: &Mat3, b: &Mat3) -> Mat3 {
        let ae = &a.elements;
        let be = &b.elements;
        let mut result = [0.0f32; 9];

        for col in 0..3 {
            for row in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += ae[k * 3 + row] * be[col * 3 + k];
                }
                result[col * 3 + row] = sum;
            }
        }

        Mat3::new(result)
    }

    /// `other * self`: applies `self` first
    #[inline]
    pub fn premultiply(&self, other: &Mat3) -> Mat3 {
        Self::mul_mat(other, self)
    }

    pub fn determinant(&self) -> f32 {
        let te = &self.elements;
        let (a, b, c) = (te[0], te[1], te[2]);
        let (d, e, f) = (te[3], te[4], te[5]);
        let (g, h, i) = (te[6], te[7], te[8]);

        a * e * i - a * f * h - b * d * i + b * f * g + c * d * h - c * e * g
    }

    #[rustfmt::skip]
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::new([
            m[0], m[3], m[6],
            m[1], m[4], m[7],
            m[2], m[5], m[8],
        ])
    }

    /// Adjugate-based inverse, failing with [`MathError::SingularMatrix`] when the determinant is zero
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        let me = &self.elements;
        let (n11, n21, n31) = (me[0], me[1], me[2]);
        let (n12, n22, n32) = (me[3], me[4], me[5]);
        let (n13, n23, n33) = (me[6], me[7], me[8]);

        let t11 = n33 * n22 - n32 * n23;
        let t12 = n32 * n13 - n33 * n12;
        let t13 = n23 * n12 - n22 * n13;

        let det = n11 * t11 + n21 * t12 + n31 * t13;
        if det == 0.0 {
            return Err(MathError::SingularMatrix { determinant: det });
        }

        let d = 1.0 / det;
        Ok(Self::new([
            t11 * d,
            (n31 * n23 - n33 * n21) * d,
            (n32 * n21 - n31 * n22) * d,
            t12 * d,
            (n33 * n11 - n31 * n13) * d,
            (n31 * n12 - n32 * n11) * d,
            t13 * d,
            (n21 * n13 - n23 * n11) * d,
            (n22 * n11 - n21 * n12) * d,
        ]))
    }

    /// Inverse under the given singular-matrix policy
    pub fn inverse_with(&self, policy: SingularPolicy) -> Result<Self, MathError> {
        match self.try_inverse() {
            Ok(inverse) => Ok(inverse),
            Err(err) if policy == SingularPolicy::Permissive => {
                log::warn!("Mat3::inverse: {}; substituting identity", err);
                Ok(Self::IDENTITY)
            }
            Err(err) => Err(err),
        }
    }

    /// Inverse, or the identity (with a logged warning) when singular
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|err| {
            log::warn!("Mat3::inverse: {}; substituting identity", err);
            Self::IDENTITY
        })
    }

    /// Inverse-transpose of the upper-left 3x3 of `m`
    ///
    /// Transforms surface normals so they stay perpendicular under non-uniform scale.
    pub fn try_normal_matrix(m: &Mat4) -> Result<Self, MathError> {
        Ok(Self::from_mat4(m).try_inverse()?.transpose())
    }

    /// Normal matrix under the given singular-matrix policy
    pub fn normal_matrix_with(m: &Mat4, policy: SingularPolicy) -> Result<Self, MathError> {
        Ok(Self::from_mat4(m).inverse_with(policy)?.transpose())
    }

    /// Normal matrix, or the identity (with a logged warning) when singular
    pub fn normal_matrix(m: &Mat4) -> Self {
        Self::from_mat4(m).inverse().transpose()
    }

    /// Transform `count` interleaved xyz triplets of `array` in place, starting at value `offset`
    pub fn apply_to_vec3_slice(
        &self,
        array: &mut [f32],
        offset: usize,
        count: usize,
    ) -> Result<(), MathError> {
        let len = check_strided_range(offset, count, 3, array.len())?;
        for chunk in array[offset..offset + len].chunks_exact_mut(3) {
            let v = Vec3::new(chunk[0], chunk[1], chunk[2]).apply_mat3(self);
            chunk.copy_from_slice(&v.to_array());
        }
        Ok(())
    }

    /// Transform `count` elements of an attribute in place, starting at element `start`
    pub fn apply_to_attribute<A: BufferAttribute + ?Sized>(
        &self,
        attribute: &mut A,
        start: usize,
        count: usize,
    ) -> Result<(), MathError> {
        check_range(start, count, attribute.count())?;
        for index in start..start + count {
            let v = Vec3::from_attribute(attribute, index)?.apply_mat3(self);
            v.write_to_attribute(attribute, index)?;
        }
        Ok(())
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Mat3;
    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        Mat3::mul_mat(&self, &rhs)
    }
}

impl std::ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.apply_mat3(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::InterleavedBuffer;

    const EPSILON: f32 = 0.0001;

    fn mat_approx_eq(a: &Mat3, b: &Mat3) -> bool {
        a.elements
            .iter()
            .zip(b.elements.iter())
            .all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn test_set_is_row_major() {
        let mut m = Mat3::IDENTITY;
        m.set(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.elements, [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        m.identity();
        assert_eq!(m, Mat3::IDENTITY);
    }

    #[test]
    fn test_determinant() {
        let m = Mat3::from_rows(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        assert_eq!(m.determinant(), 24.0);

        let m = Mat3::from_rows(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0);
        assert!((m.determinant() - -3.0).abs() < EPSILON);
    }

    #[test]
    fn test_inverse_identity_product() {
        let m = Mat3::from_rows(1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0);
        let inv = m.try_inverse().unwrap();
        assert!(mat_approx_eq(&(m * inv), &Mat3::IDENTITY));
        assert!(mat_approx_eq(&(inv * m), &Mat3::IDENTITY));
    }

    #[test]
    fn test_zero_row_is_singular() {
        let m = Mat3::from_rows(1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0);
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Mat3::IDENTITY);
        assert_eq!(
            m.try_inverse(),
            Err(MathError::SingularMatrix { determinant: 0.0 })
        );
        assert_eq!(m.inverse_with(SingularPolicy::Permissive), Ok(Mat3::IDENTITY));
        assert!(m.inverse_with(SingularPolicy::Strict).is_err());
    }

    #[test]
    fn test_transpose() {
        let m = Mat3::from_rows(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let t = m.transpose();
        assert_eq!(t, Mat3::from_rows(1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0));

        let mut out = [0.0f32; 9];
        m.transpose_into_array(&mut out).unwrap();
        assert_eq!(out, t.elements);
        assert!(m.transpose_into_array(&mut [0.0; 8]).is_err());
    }

    #[test]
    fn test_from_mat4() {
        let m4 = Mat4::make_scale(2.0, 3.0, 4.0) * Mat4::make_translation(9.0, 9.0, 9.0);
        let m3 = Mat3::from_mat4(&m4);
        assert_eq!(m3, Mat3::from_rows(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_normal_matrix_keeps_normals_perpendicular() {
        let m = Mat4::make_scale(1.0, 4.0, 1.0);
        let n = Mat3::normal_matrix(&m);

        let tangent = Vec3::new(1.0, 1.0, 0.0).apply_mat4(&m);
        let normal = Vec3::new(1.0, -1.0, 0.0).apply_mat3(&n);
        assert!(tangent.dot(normal).abs() < EPSILON);
    }

    #[test]
    fn test_normal_matrix_singular() {
        let m = Mat4::make_scale(0.0, 1.0, 1.0);
        assert_eq!(Mat3::normal_matrix(&m), Mat3::IDENTITY);
        assert!(Mat3::try_normal_matrix(&m).is_err());
        assert!(Mat3::normal_matrix_with(&m, SingularPolicy::Strict).is_err());
        assert_eq!(
            Mat3::normal_matrix_with(&m, SingularPolicy::Permissive),
            Ok(Mat3::IDENTITY)
        );
    }

    #[test]
    fn test_multiply_scalar() {
        let m = Mat3::IDENTITY.multiply_scalar(3.0);
        assert_eq!(m.determinant(), 27.0);
    }

    #[test]
    fn test_mul_order() {
        let a = Mat3::from_rows(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let b = Mat3::from_rows(2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        // scale x, then rotate 90 degrees about z
        assert_eq!(Vec3::X.apply_mat3(&(a * b)), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(b.premultiply(&a), a * b);
    }

    #[test]
    fn test_apply_to_vec3_slice() {
        let m = Mat3::IDENTITY.multiply_scalar(2.0);
        let mut data = [1.0f32, 1.0, 1.0, 1.0, 2.0, 3.0];
        m.apply_to_vec3_slice(&mut data, 3, 1).unwrap();
        assert_eq!(data, [1.0, 1.0, 1.0, 2.0, 4.0, 6.0]);
        assert!(m.apply_to_vec3_slice(&mut data, 1, 2).is_err());
    }

    #[test]
    fn test_apply_to_vec3_slice_huge_count_is_rejected() {
        let mut data = [1.0f32; 6];
        let result = Mat3::IDENTITY.apply_to_vec3_slice(&mut data, 0, usize::MAX / 2);
        assert!(matches!(result, Err(MathError::IndexOutOfRange { .. })));
        assert_eq!(data, [1.0; 6]);
    }

    #[test]
    fn test_apply_to_attribute_writes_each_element() {
        let m = Mat3::IDENTITY.multiply_scalar(-1.0);
        let mut buffer = InterleavedBuffer::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3);
        m.apply_to_attribute(&mut buffer, 1, 2).unwrap();
        assert_eq!(
            buffer.as_slice(),
            &[1.0, 2.0, 3.0, -4.0, -5.0, -6.0, -7.0, -8.0, -9.0]
        );
        assert!(m.apply_to_attribute(&mut buffer, 2, 2).is_err());
    }
}
