//! 4x4 Matrix for affine and projective transforms
//!
//! Storage is column-major: element `[col * 4 + row]`. Rotation and scale live
//! in the upper-left 3x3, translation in column 3, and the bottom row carries
//! the projective terms.
//!
//! Products compose right to left: `a * b` applied to a column vector applies
//! `b` first, then `a`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::attribute::BufferAttribute;
use crate::error::{check_range, check_strided_range, MathError, SingularPolicy};
use crate::euler::{Euler, RotationOrder};
use crate::{Quat, Vec3, Vec4};

/// 4x4 matrix (column-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    pub elements: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, // col 0
            0.0, 1.0, 0.0, 0.0, // col 1
            0.0, 0.0, 1.0, 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ],
    };

    /// Wrap column-major elements
    #[inline]
    pub const fn new(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Build from arguments given in row-major reading order
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn from_rows(
        n11: f32, n12: f32, n13: f32, n14: f32,
        n21: f32, n22: f32, n23: f32, n24: f32,
        n31: f32, n32: f32, n33: f32, n34: f32,
        n41: f32, n42: f32, n43: f32, n44: f32,
    ) -> Self {
        Self {
            elements: [
                n11, n21, n31, n41,
                n12, n22, n32, n42,
                n13, n23, n33, n43,
                n14, n24, n34, n44,
            ],
        }
    }

    /// Overwrite every element, arguments in row-major reading order
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn set(
        &mut self,
        n11: f32, n12: f32, n13: f32, n14: f32,
        n21: f32, n22: f32, n23: f32, n24: f32,
        n31: f32, n32: f32, n33: f32, n34: f32,
        n41: f32, n42: f32, n43: f32, n44: f32,
    ) {
        *self = Self::from_rows(
            n11, n12, n13, n14,
            n21, n22, n23, n24,
            n31, n32, n33, n34,
            n41, n42, n43, n44,
        );
    }

    /// Reset to the identity
    pub fn identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Read 16 column-major values starting at `offset`
    pub fn from_array(array: &[f32], offset: usize) -> Result<Self, MathError> {
        check_range(offset, 16, array.len())?;
        let mut elements = [0.0; 16];
        elements.copy_from_slice(&array[offset..offset + 16]);
        Ok(Self { elements })
    }

    /// Write the 16 column-major values into `array` at `offset`
    pub fn write_to_slice(&self, array: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_range(offset, 16, array.len())?;
        array[offset..offset + 16].copy_from_slice(&self.elements);
        Ok(())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 16] {
        self.elements
    }

    /// Get a column vector from the matrix
    ///
    /// # Panics
    /// Panics if `col > 3`.
    pub fn column(&self, col: usize) -> Vec4 {
        debug_assert!(col < 4, "Mat4::column: column {} out of range 0..4", col);
        let e = &self.elements;
        Vec4::new(e[col * 4], e[col * 4 + 1], e[col * 4 + 2], e[col * 4 + 3])
    }

    /// Translation matrix
    #[rustfmt::skip]
    pub const fn make_translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows(
            1.0, 0.0, 0.0, x,
            0.0, 1.0, 0.0, y,
            0.0, 0.0, 1.0, z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Non-uniform scale matrix
    #[rustfmt::skip]
    pub const fn make_scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows(
            x,   0.0, 0.0, 0.0,
            0.0, y,   0.0, 0.0,
            0.0, 0.0, z,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the X axis by `theta` radians
    #[rustfmt::skip]
    pub fn make_rotation_x(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Y axis by `theta` radians
    #[rustfmt::skip]
    pub fn make_rotation_y(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Z axis by `theta` radians
    #[rustfmt::skip]
    pub fn make_rotation_z(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about a unit `axis` by `angle` radians
    #[rustfmt::skip]
    pub fn make_rotation_axis(axis: Vec3, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let tx = t * x;
        let ty = t * y;

        Self::from_rows(
            tx * x + c,     tx * y - s * z, tx * z + s * y, 0.0,
            tx * y + s * z, ty * y + c,     ty * z - s * x, 0.0,
            tx * z - s * y, ty * z + s * x, t * z * z + c,  0.0,
            0.0,            0.0,            0.0,            1.0,
        )
    }

    /// Pure rotation from a quaternion
    pub fn from_quat(q: &Quat) -> Self {
        Self::compose(Vec3::ZERO, q, Vec3::ONE)
    }

    /// Replace the rotation part with the rotation of `q`, keeping the translation
    pub fn make_rotation_from_quaternion(&mut self, q: &Quat) {
        let position = Vec3::from_matrix_position(self);
        *self = Self::compose(position, q, Vec3::ONE);
    }

    /// Pure rotation from Euler angles, applied in the Euler's axis order
    pub fn from_euler(euler: &Euler) -> Self {
        let (a, b) = (euler.x().cos(), euler.x().sin());
        let (c, d) = (euler.y().cos(), euler.y().sin());
        let (e, f) = (euler.z().cos(), euler.z().sin());

        let mut m = Self::IDENTITY;
        let te = &mut m.elements;

        match euler.order() {
            RotationOrder::XYZ => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                te[0] = c * e;
                te[4] = -c * f;
                te[8] = d;
                te[1] = af + be * d;
                te[5] = ae - bf * d;
                te[9] = -b * c;
                te[2] = bf - ae * d;
                te[6] = be + af * d;
                te[10] = a * c;
            }
            RotationOrder::YXZ => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                te[0] = ce + df * b;
                te[4] = de * b - cf;
                te[8] = a * d;
                te[1] = a * f;
                te[5] = a * e;
                te[9] = -b;
                te[2] = cf * b - de;
                te[6] = df + ce * b;
                te[10] = a * c;
            }
            RotationOrder::ZXY => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);
                te[0] = ce - df * b;
                te[4] = -a * f;
                te[8] = de + cf * b;
                te[1] = cf + de * b;
                te[5] = a * e;
                te[9] = df - ce * b;
                te[2] = -a * d;
                te[6] = b;
                te[10] = a * c;
            }
            RotationOrder::ZYX => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);
                te[0] = c * e;
                te[4] = be * d - af;
                te[8] = ae * d + bf;
                te[1] = c * f;
                te[5] = bf * d + ae;
                te[9] = af * d - be;
                te[2] = -d;
                te[6] = b * c;
                te[10] = a * c;
            }
            RotationOrder::YZX => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                te[0] = c * e;
                te[4] = bd - ac * f;
                te[8] = bc * f + ad;
                te[1] = f;
                te[5] = a * e;
                te[9] = -b * e;
                te[2] = -d * e;
                te[6] = ad * f + bc;
                te[10] = ac - bd * f;
            }
            RotationOrder::XZY => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);
                te[0] = c * e;
                te[4] = -f;
                te[8] = d * e;
                te[1] = ac * f + bd;
                te[5] = a * e;
                te[9] = ad * f - bc;
                te[2] = bc * f - ad;
                te[6] = b * e;
                te[10] = bd * f + ac;
            }
        }

        m
    }

    /// Translation, then rotation, then scale packed into one affine matrix
    ///
    /// Applied to a point this scales first, rotates second and translates last.
    pub fn compose(position: Vec3, rotation: &Quat, scale: Vec3) -> Self {
        let (x, y, z, w) = (rotation.x, rotation.y, rotation.z, rotation.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let (sx, sy, sz) = (scale.x, scale.y, scale.z);

        Self::new([
            (1.0 - (yy + zz)) * sx,
            (xy + wz) * sx,
            (xz - wy) * sx,
            0.0,
            (xy - wz) * sy,
            (1.0 - (xx + zz)) * sy,
            (yz + wx) * sy,
            0.0,
            (xz + wy) * sz,
            (yz - wx) * sz,
            (1.0 - (xx + yy)) * sz,
            0.0,
            position.x,
            position.y,
            position.z,
            1.0,
        ])
    }

    /// Split an affine matrix into position, rotation and scale
    ///
    /// A negative determinant is folded into the x scale. A zero scale on any
    /// axis leaves no recoverable rotation, so the identity rotation is returned.
    pub fn decompose(&self) -> (Vec3, Quat, Vec3) {
        let mut sx = Vec3::from_matrix_column(self, 0).length();
        let sy = Vec3::from_matrix_column(self, 1).length();
        let sz = Vec3::from_matrix_column(self, 2).length();

        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let position = Vec3::from_matrix_position(self);
        let scale = Vec3::new(sx, sy, sz);

        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            return (position, Quat::IDENTITY, scale);
        }

        let mut rotation = *self;
        let inv = [1.0 / sx, 1.0 / sy, 1.0 / sz];
        for (col, factor) in inv.iter().enumerate() {
            for row in 0..3 {
                rotation.elements[col * 4 + row] *= factor;
            }
        }

        (position, Quat::from_rotation_matrix(&rotation), scale)
    }

    /// The rotation part of `m` with scale removed and no translation
    ///
    /// Zero-length basis columns stay zero.
    pub fn extract_rotation(m: &Mat4) -> Self {
        let mut result = Self::IDENTITY;
        for col in 0..3 {
            let basis = Vec3::from_matrix_column(m, col);
            let len = basis.length();
            let scale = if len > 0.0 { 1.0 / len } else { 0.0 };
            for row in 0..3 {
                result.elements[col * 4 + row] = m.elements[col * 4 + row] * scale;
            }
        }
        result
    }

    /// The three basis vectors (first three columns)
    pub fn extract_basis(&self) -> (Vec3, Vec3, Vec3) {
        (
            Vec3::from_matrix_column(self, 0),
            Vec3::from_matrix_column(self, 1),
            Vec3::from_matrix_column(self, 2),
        )
    }

    /// Matrix whose columns are the given basis vectors
    #[rustfmt::skip]
    pub fn make_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        Self::from_rows(
            x_axis.x, y_axis.x, z_axis.x, 0.0,
            x_axis.y, y_axis.y, z_axis.y, 0.0,
            x_axis.z, y_axis.z, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Overwrite the translation column
    pub fn set_position(&mut self, position: Vec3) {
        self.elements[12] = position.x;
        self.elements[13] = position.y;
        self.elements[14] = position.z;
    }

    /// Scale the three basis columns by `v`
    pub fn scale(&self, v: Vec3) -> Self {
        let mut m = *self;
        let factors = [v.x, v.y, v.z];
        for (col, factor) in factors.iter().enumerate() {
            for row in 0..4 {
                m.elements[col * 4 + row] *= factor;
            }
        }
        m
    }

    /// Largest basis-column length
    pub fn max_scale_on_axis(&self) -> f32 {
        let (x, y, z) = self.extract_basis();
        x.length_squared()
            .max(y.length_squared())
            .max(z.length_squared())
            .sqrt()
    }

    /// Rotation that orients -Z from `eye` toward `target`, with `up` as the rough Y
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut z = eye - target;
        if z.length_squared() == 0.0 {
            // eye and target are in the same position
            z.z = 1.0;
        }
        z = z.normalized();

        let mut x = up.cross(z);
        if x.length_squared() == 0.0 {
            // up and z are parallel
            if up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z = z.normalized();
            x = up.cross(z);
        }
        let x = x.normalized();
        let y = z.cross(x);

        Self::make_basis(x, y, z)
    }

    /// Perspective projection from an explicit frustum
    #[rustfmt::skip]
    pub fn make_perspective(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);

        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        Self::from_rows(
            x,   0.0, a,    0.0,
            0.0, y,   b,    0.0,
            0.0, 0.0, c,    d,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Perspective projection from a vertical field of view in radians
    pub fn make_perspective_fov(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let ymax = near * (fov_y * 0.5).tan();
        let ymin = -ymax;
        Self::make_perspective(ymin * aspect, ymax * aspect, ymax, ymin, near, far)
    }

    /// Orthographic projection
    #[rustfmt::skip]
    pub fn make_orthographic(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let p = 1.0 / (far - near);

        let x = (right + left) * w;
        let y = (top + bottom) * h;
        let z = (far + near) * p;

        Self::from_rows(
            2.0 * w, 0.0,     0.0,      -x,
            0.0,     2.0 * h, 0.0,      -y,
            0.0,     0.0,     -2.0 * p, -z,
            0.0,     0.0,     0.0,      1.0,
        )
    }

    /// Multiply two 4x4 matrices: result = a * b
    ///
    /// In column-major convention, this applies b first, then a.
    #[allow(clippy::needless_range_loop)]
    pub fn mul_mat(a: &Mat4, b: &Mat4) -> Mat4 {
        let ae = &a.elements;
        let be = &b.elements;
        let mut result = [0.0f32; 16];

        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += ae[k * 4 + row] * be[col * 4 + k];
                }
                result[col * 4 + row] = sum;
            }
        }

        Mat4::new(result)
    }

    /// `self * other`: applies `other` first
    #[inline]
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        Self::mul_mat(self, other)
    }

    /// `other * self`: applies `self` first
    #[inline]
    pub fn premultiply(&self, other: &Mat4) -> Mat4 {
        Self::mul_mat(other, self)
    }

    pub fn multiply_scalar(&self, s: f32) -> Self {
        let mut m = *self;
        for e in m.elements.iter_mut() {
            *e *= s;
        }
        m
    }

    /// Transpose a matrix
    #[rustfmt::skip]
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::new([
            m[0], m[4], m[8],  m[12],
            m[1], m[5], m[9],  m[13],
            m[2], m[6], m[10], m[14],
            m[3], m[7], m[11], m[15],
        ])
    }

    /// Cofactors of the first column, shared by `determinant` and the inverse
    fn first_column_cofactors(&self) -> [f32; 4] {
        let te = &self.elements;
        let (n12, n22, n32, n42) = (te[4], te[5], te[6], te[7]);
        let (n13, n23, n33, n43) = (te[8], te[9], te[10], te[11]);
        let (n14, n24, n34, n44) = (te[12], te[13], te[14], te[15]);

        [
            n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43 - n22 * n34 * n43
                - n23 * n32 * n44
                + n22 * n33 * n44,
            n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43 + n12 * n34 * n43
                + n13 * n32 * n44
                - n12 * n33 * n44,
            n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43 - n12 * n24 * n43
                - n13 * n22 * n44
                + n12 * n23 * n44,
            n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33
                + n13 * n22 * n34
                - n12 * n23 * n34,
        ]
    }

    /// Determinant by cofactor expansion along the first column
    pub fn determinant(&self) -> f32 {
        let te = &self.elements;
        let t = self.first_column_cofactors();
        te[0] * t[0] + te[1] * t[1] + te[2] * t[2] + te[3] * t[3]
    }

    /// Adjugate-based inverse, failing with [`MathError::SingularMatrix`] when the determinant is zero
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        let te = &self.elements;
        let (n11, n21, n31, n41) = (te[0], te[1], te[2], te[3]);
        let (n12, n22, n32, n42) = (te[4], te[5], te[6], te[7]);
        let (n13, n23, n33, n43) = (te[8], te[9], te[10], te[11]);
        let (n14, n24, n34, n44) = (te[12], te[13], te[14], te[15]);

        let [t11, t12, t13, t14] = self.first_column_cofactors();
        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;

        if det == 0.0 {
            return Err(MathError::SingularMatrix { determinant: det });
        }

        let d = 1.0 / det;

        Ok(Self::new([
            t11 * d,
            (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43 + n21 * n34 * n43
                + n23 * n31 * n44
                - n21 * n33 * n44)
                * d,
            (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42 - n21 * n34 * n42
                - n22 * n31 * n44
                + n21 * n32 * n44)
                * d,
            (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42 + n21 * n33 * n42
                + n22 * n31 * n43
                - n21 * n32 * n43)
                * d,
            t12 * d,
            (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43 - n11 * n34 * n43
                - n13 * n31 * n44
                + n11 * n33 * n44)
                * d,
            (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42 + n11 * n34 * n42
                + n12 * n31 * n44
                - n11 * n32 * n44)
                * d,
            (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42 - n11 * n33 * n42
                - n12 * n31 * n43
                + n11 * n32 * n43)
                * d,
            t13 * d,
            (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43 + n11 * n24 * n43
                + n13 * n21 * n44
                - n11 * n23 * n44)
                * d,
            (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42 - n11 * n24 * n42
                - n12 * n21 * n44
                + n11 * n22 * n44)
                * d,
            (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42 + n11 * n23 * n42
                + n12 * n21 * n43
                - n11 * n22 * n43)
                * d,
            t14 * d,
            (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33 - n11 * n24 * n33
                - n13 * n21 * n34
                + n11 * n23 * n34)
                * d,
            (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32 + n11 * n24 * n32
                + n12 * n21 * n34
                - n11 * n22 * n34)
                * d,
            (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32 - n11 * n23 * n32
                - n12 * n21 * n33
                + n11 * n22 * n33)
                * d,
        ]))
    }

    /// Inverse under the given singular-matrix policy
    ///
    /// `Permissive` logs a warning and returns the identity for a singular
    /// matrix; `Strict` returns the error.
    pub fn inverse_with(&self, policy: SingularPolicy) -> Result<Self, MathError> {
        match self.try_inverse() {
            Ok(inverse) => Ok(inverse),
            Err(err) => match policy {
                SingularPolicy::Strict => Err(err),
                SingularPolicy::Permissive => {
                    log::warn!("Mat4::inverse: {}; substituting identity", err);
                    Ok(Self::IDENTITY)
                }
            },
        }
    }

    /// Inverse, or the identity (with a logged warning) when singular
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|err| {
            log::warn!("Mat4::inverse: {}; substituting identity", err);
            Self::IDENTITY
        })
    }

    /// Transform `count` interleaved xyz points of `array` in place, starting at value `offset`
    ///
    /// Points are treated as positions (translation applied).
    pub fn apply_to_vec3_slice(
        &self,
        array: &mut [f32],
        offset: usize,
        count: usize,
    ) -> Result<(), MathError> {
        let len = check_strided_range(offset, count, 3, array.len())?;
        for chunk in array[offset..offset + len].chunks_exact_mut(3) {
            let v = Vec3::new(chunk[0], chunk[1], chunk[2]).apply_mat4(self);
            chunk.copy_from_slice(&v.to_array());
        }
        Ok(())
    }

    /// Transform `count` elements of an attribute as positions, starting at element `start`
    pub fn apply_to_attribute<A: BufferAttribute + ?Sized>(
        &self,
        attribute: &mut A,
        start: usize,
        count: usize,
    ) -> Result<(), MathError> {
        check_range(start, count, attribute.count())?;
        for index in start..start + count {
            let v = Vec3::from_attribute(attribute, index)?.apply_mat4(self);
            v.write_to_attribute(attribute, index)?;
        }
        Ok(())
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::mul_mat(&self, &rhs)
    }
}

impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        rhs.apply_mat4(&self)
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(elements: [f32; 16]) -> Self {
        Self { elements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::InterleavedBuffer;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: &Mat4, b: &Mat4) -> bool {
        a.elements
            .iter()
            .zip(b.elements.iter())
            .all(|(x, y)| approx_eq(*x, *y))
    }

    #[test]
    fn test_from_rows_is_column_major() {
        let m = Mat4::make_translation(5.0, 6.0, 7.0);
        assert_eq!(m.elements[12], 5.0);
        assert_eq!(m.elements[13], 6.0);
        assert_eq!(m.elements[14], 7.0);
        assert_eq!(m.column(3), Vec4::new(5.0, 6.0, 7.0, 1.0));
    }

    #[test]
    #[should_panic]
    fn test_column_past_last_panics() {
        Mat4::IDENTITY.column(4);
    }

    #[test]
    fn test_mul_identity() {
        let a = Mat4::make_rotation_x(0.5);
        assert!(mat_approx_eq(&(Mat4::IDENTITY * a), &a));
        assert!(mat_approx_eq(&(a * Mat4::IDENTITY), &a));
    }

    #[test]
    fn test_mul_applies_right_operand_first() {
        let t = Mat4::make_translation(1.0, 0.0, 0.0);
        let s = Mat4::make_scale(2.0, 2.0, 2.0);

        // scale, then translate
        let p = Vec3::ONE.apply_mat4(&(t * s));
        assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));

        // translate, then scale
        let q = Vec3::ONE.apply_mat4(&t.premultiply(&s));
        assert_eq!(q, Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn test_mul_composition() {
        // Two 45° rotations should equal one 90° rotation
        let r45 = Mat4::make_rotation_z(FRAC_PI_4);
        let r90 = Mat4::make_rotation_z(FRAC_PI_2);
        let composed = r45 * r45;

        assert!(mat_approx_eq(&composed, &r90));
        assert!(vec_approx_eq(Vec3::X.apply_mat4(&composed), Vec3::Y));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat4::make_scale(2.0, 3.0, 4.0).determinant(), 24.0);
        assert!(approx_eq(Mat4::make_rotation_y(0.7).determinant(), 1.0));
    }

    #[test]
    fn test_inverse_identity_product() {
        let m = Mat4::compose(
            Vec3::new(1.0, -2.0, 3.0),
            &Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalized(), 0.8),
            Vec3::new(2.0, 0.5, 1.5),
        );
        let inv = m.try_inverse().unwrap();
        assert!(mat_approx_eq(&(m * inv), &Mat4::IDENTITY));
        assert!(mat_approx_eq(&(inv * m), &Mat4::IDENTITY));
    }

    #[test]
    fn test_inverse_of_projection() {
        let m = Mat4::make_perspective_fov(1.0, 1.5, 0.1, 100.0);
        let inv = m.try_inverse().unwrap();
        assert!(mat_approx_eq(&(m * inv), &Mat4::IDENTITY));
    }

    #[test]
    fn test_singular_inverse_policies() {
        let singular = Mat4::make_scale(1.0, 0.0, 1.0);
        assert_eq!(singular.determinant(), 0.0);
        assert!(matches!(
            singular.try_inverse(),
            Err(MathError::SingularMatrix { .. })
        ));
        assert_eq!(singular.inverse(), Mat4::IDENTITY);
        assert_eq!(
            singular.inverse_with(SingularPolicy::Permissive),
            Ok(Mat4::IDENTITY)
        );
        assert!(singular.inverse_with(SingularPolicy::Strict).is_err());
    }

    #[test]
    fn test_transpose() {
        let m = Mat4::make_translation(1.0, 2.0, 3.0).transpose();
        assert_eq!(m.elements[3], 1.0);
        assert_eq!(m.elements[7], 2.0);
        assert_eq!(m.elements[11], 3.0);
        assert_eq!(m.transpose(), Mat4::make_translation(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_axis_matches_named_axes() {
        let a = Mat4::make_rotation_axis(Vec3::Y, 0.3);
        assert!(mat_approx_eq(&a, &Mat4::make_rotation_y(0.3)));
        let b = Mat4::make_rotation_axis(Vec3::Z, -1.2);
        assert!(mat_approx_eq(&b, &Mat4::make_rotation_z(-1.2)));
    }

    #[test]
    fn test_make_rotation_from_quaternion_keeps_translation() {
        let mut m = Mat4::make_translation(1.0, 2.0, 3.0);
        m.make_rotation_from_quaternion(&Quat::from_axis_angle(Vec3::Z, FRAC_PI_2));
        assert!(vec_approx_eq(Vec3::from_matrix_position(&m), Vec3::new(1.0, 2.0, 3.0)));
        assert!(vec_approx_eq(Vec3::X.transform_direction(&m), Vec3::Y));
    }

    #[test]
    fn test_compose_decompose() {
        let position = Vec3::new(4.0, 5.0, 6.0);
        let rotation = Quat::from_axis_angle(Vec3::Z, 0.5);
        let scale = Vec3::new(1.0, 2.0, 3.0);

        let (p, q, s) = Mat4::compose(position, &rotation, scale).decompose();
        assert!(vec_approx_eq(p, position));
        assert!(vec_approx_eq(s, scale));
        assert!(approx_eq(q.dot(&rotation).abs(), 1.0));
    }

    #[test]
    fn test_decompose_zero_scale() {
        let (_, q, s) = Mat4::make_scale(0.0, 1.0, 1.0).decompose();
        assert_eq!(q, Quat::IDENTITY);
        assert_eq!(s.x, 0.0);
    }

    #[test]
    fn test_extract_rotation_strips_scale() {
        let m = Mat4::make_rotation_x(0.4).scale(Vec3::new(3.0, 3.0, 3.0));
        let r = Mat4::extract_rotation(&m);
        assert!(mat_approx_eq(&r, &Mat4::make_rotation_x(0.4)));
    }

    #[test]
    fn test_max_scale_on_axis() {
        assert!(approx_eq(Mat4::make_scale(1.0, -5.0, 2.0).max_scale_on_axis(), 5.0));
    }

    #[test]
    fn test_look_at_points_negative_z_at_target() {
        let m = Mat4::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0), Vec3::Y);
        assert!(mat_approx_eq(&m, &Mat4::IDENTITY));

        let m = Mat4::look_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        assert!(vec_approx_eq((-Vec3::Z).apply_mat4(&m), Vec3::X));
    }

    #[test]
    fn test_look_at_parallel_up_stays_finite() {
        let m = Mat4::look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(m.elements.iter().all(|e| e.is_finite()));
    }

    #[test]
    fn test_orthographic_maps_box_to_clip_cube() {
        let m = Mat4::make_orthographic(-2.0, 2.0, 1.0, -1.0, 0.0, 10.0);
        let corner = Vec3::new(2.0, 1.0, -10.0).apply_projection(&m);
        assert!(vec_approx_eq(corner, Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_apply_to_vec3_slice_sub_range() {
        let m = Mat4::make_translation(10.0, 0.0, 0.0);
        let mut data = [0.0f32, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0];
        m.apply_to_vec3_slice(&mut data, 3, 1).unwrap();
        assert_eq!(data, [0.0, 0.0, 0.0, 11.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        assert!(m.apply_to_vec3_slice(&mut data, 3, 3).is_err());
    }

    #[test]
    fn test_apply_to_vec3_slice_huge_count_is_rejected() {
        let mut data = [0.0f32; 6];
        let result = Mat4::IDENTITY.apply_to_vec3_slice(&mut data, 0, usize::MAX / 2);
        assert!(matches!(result, Err(MathError::IndexOutOfRange { .. })));

        let result = Mat4::IDENTITY.apply_to_vec3_slice(&mut data, usize::MAX, 1);
        assert!(matches!(result, Err(MathError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_apply_to_attribute() {
        let m = Mat4::make_scale(2.0, 2.0, 2.0);
        let mut buffer = InterleavedBuffer::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        m.apply_to_attribute(&mut buffer, 1, 1).unwrap();
        assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_array_round_trip() {
        let m = Mat4::make_rotation_z(0.25);
        let mut buffer = vec![0.0f32; 18];
        m.write_to_slice(&mut buffer, 2).unwrap();
        assert_eq!(Mat4::from_array(&buffer, 2).unwrap(), m);
        assert!(Mat4::from_array(&buffer, 3).is_err());
    }
}
