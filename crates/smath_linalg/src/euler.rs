//! Euler angles with an explicit axis order
//!
//! An [`Euler`] stores three angles in radians plus the [`RotationOrder`] in
//! which they are applied. The order name describes the intrinsic sequence:
//! `XYZ` rotates about X, then the new Y, then the new Z, which is the matrix
//! product `Rx * Ry * Rz`.
//!
//! Every mutation is reported through [`EulerChange`] flags. Owners can either
//! register a callback with [`Euler::on_change`] or poll the accumulated set
//! with [`Euler::take_changes`].

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{check_range, MathError};
use crate::scalar::{clamp_unit, GIMBAL_THRESHOLD};
use crate::{Mat4, Quat, Vec3};

/// The six axis orders an Euler rotation can be applied in
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationOrder {
    #[default]
    XYZ,
    YZX,
    ZXY,
    XZY,
    YXZ,
    ZYX,
}

impl RotationOrder {
    /// All orders
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::XYZ,
        RotationOrder::YZX,
        RotationOrder::ZXY,
        RotationOrder::XZY,
        RotationOrder::YXZ,
        RotationOrder::ZYX,
    ];

    /// Canonical upper-case name
    pub const fn as_str(self) -> &'static str {
        match self {
            RotationOrder::XYZ => "XYZ",
            RotationOrder::YZX => "YZX",
            RotationOrder::ZXY => "ZXY",
            RotationOrder::XZY => "XZY",
            RotationOrder::YXZ => "YXZ",
            RotationOrder::ZYX => "ZYX",
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RotationOrder::ALL
            .iter()
            .copied()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| MathError::UnsupportedRotationOrder(s.to_string()))
    }
}

bitflags! {
    /// Which parts of an [`Euler`] changed
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EulerChange: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const ORDER = 1 << 3;
        const ANGLES = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

type ChangeCallback = Box<dyn FnMut(EulerChange) + Send>;

/// Three rotation angles in radians plus the order they are applied in
#[derive(Serialize, Deserialize)]
pub struct Euler {
    x: f32,
    y: f32,
    z: f32,
    #[serde(default)]
    order: RotationOrder,
    #[serde(skip)]
    changes: EulerChange,
    #[serde(skip)]
    on_change: Option<ChangeCallback>,
}

impl Euler {
    pub fn new(x: f32, y: f32, z: f32, order: RotationOrder) -> Self {
        Self {
            x,
            y,
            z,
            order,
            changes: EulerChange::empty(),
            on_change: None,
        }
    }

    /// Euler angles taken from a vector's components
    pub fn from_vec3(v: Vec3, order: RotationOrder) -> Self {
        Self::new(v.x, v.y, v.z, order)
    }

    /// Decompose the rotation part of `m` in the given order
    pub fn from_rotation_matrix(m: &Mat4, order: RotationOrder) -> Self {
        let mut euler = Self::new(0.0, 0.0, 0.0, order);
        euler.extract(m, order);
        euler
    }

    /// Decompose a quaternion in the given order
    pub fn from_quat(q: &Quat, order: RotationOrder) -> Self {
        Self::from_rotation_matrix(&Mat4::from_quat(q), order)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    #[inline]
    pub fn order(&self) -> RotationOrder {
        self.order
    }

    pub fn set_x(&mut self, value: f32) {
        self.x = value;
        self.notify(EulerChange::X);
    }

    pub fn set_y(&mut self, value: f32) {
        self.y = value;
        self.notify(EulerChange::Y);
    }

    pub fn set_z(&mut self, value: f32) {
        self.z = value;
        self.notify(EulerChange::Z);
    }

    /// Change the order without touching the angles
    ///
    /// The represented rotation changes; use [`Euler::reorder`] to keep it.
    pub fn set_order(&mut self, order: RotationOrder) {
        self.order = order;
        self.notify(EulerChange::ORDER);
    }

    /// Change the order by name
    ///
    /// An unknown name is logged and rejected; the Euler is left untouched.
    pub fn set_order_name(&mut self, name: &str) -> Result<(), MathError> {
        let order = parse_order(name, "set_order_name")?;
        self.set_order(order);
        Ok(())
    }

    /// Set all three angles, keeping the order
    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.notify(EulerChange::ANGLES);
    }

    /// Set all three angles and the order
    pub fn set_with_order(&mut self, x: f32, y: f32, z: f32, order: RotationOrder) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.order = order;
        self.notify(EulerChange::all());
    }

    /// Copy angles and order from another Euler (its callback is not copied)
    pub fn copy_from(&mut self, other: &Euler) {
        self.set_with_order(other.x, other.y, other.z, other.order);
    }

    /// Set angles from a vector's components, keeping the order
    pub fn set_from_vec3(&mut self, v: Vec3) {
        self.set(v.x, v.y, v.z);
    }

    /// Angles as a vector
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Decompose the upper 3x3 of `m` (a pure rotation) in `order`
    ///
    /// When the asin term is within the gimbal threshold of +/-1 one angle is
    /// fixed at zero and the other is taken from a different entry pair.
    pub fn set_from_rotation_matrix(&mut self, m: &Mat4, order: RotationOrder) {
        self.extract(m, order);
        self.notify(EulerChange::all());
    }

    /// [`Euler::set_from_rotation_matrix`] with an order name
    ///
    /// An unknown name is logged and rejected; the Euler is left untouched.
    pub fn set_from_rotation_matrix_named(&mut self, m: &Mat4, name: &str) -> Result<(), MathError> {
        let order = parse_order(name, "set_from_rotation_matrix_named")?;
        self.set_from_rotation_matrix(m, order);
        Ok(())
    }

    /// Decompose a quaternion in `order`
    pub fn set_from_quaternion(&mut self, q: &Quat, order: RotationOrder) {
        self.set_from_rotation_matrix(&Mat4::from_quat(q), order);
    }

    /// Switch to `order` while keeping the same rotation
    ///
    /// Can lose information near gimbal lock of the new order.
    pub fn reorder(&mut self, order: RotationOrder) {
        let q = Quat::from_euler(self);
        self.set_from_quaternion(&q, order);
    }

    /// Read three angles starting at `offset`; the order is unchanged
    pub fn set_from_array(&mut self, array: &[f32], offset: usize) -> Result<(), MathError> {
        check_range(offset, 3, array.len())?;
        self.set(array[offset], array[offset + 1], array[offset + 2]);
        Ok(())
    }

    /// Read three angles starting at `offset`
    pub fn from_array(array: &[f32], offset: usize, order: RotationOrder) -> Result<Self, MathError> {
        check_range(offset, 3, array.len())?;
        Ok(Self::new(
            array[offset],
            array[offset + 1],
            array[offset + 2],
            order,
        ))
    }

    /// Write the three angles at `offset`; the order is carried separately
    pub fn write_to_slice(&self, array: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_range(offset, 3, array.len())?;
        array[offset] = self.x;
        array[offset + 1] = self.y;
        array[offset + 2] = self.z;
        Ok(())
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Register the callback fired after every mutation, replacing any previous one
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(EulerChange) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Remove the change callback
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Changes accumulated since the last call
    pub fn take_changes(&mut self) -> EulerChange {
        std::mem::take(&mut self.changes)
    }

    fn notify(&mut self, change: EulerChange) {
        self.changes |= change;
        if let Some(callback) = self.on_change.as_mut() {
            callback(change);
        }
    }

    fn extract(&mut self, m: &Mat4, order: RotationOrder) {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        match order {
            RotationOrder::XYZ => {
                self.y = clamp_unit(m13).asin();
                if m13.abs() < GIMBAL_THRESHOLD {
                    self.x = (-m23).atan2(m33);
                    self.z = (-m12).atan2(m11);
                } else {
                    self.x = m32.atan2(m22);
                    self.z = 0.0;
                }
            }
            RotationOrder::YXZ => {
                self.x = (-clamp_unit(m23)).asin();
                if m23.abs() < GIMBAL_THRESHOLD {
                    self.y = m13.atan2(m33);
                    self.z = m21.atan2(m22);
                } else {
                    self.y = (-m31).atan2(m11);
                    self.z = 0.0;
                }
            }
            RotationOrder::ZXY => {
                self.x = clamp_unit(m32).asin();
                if m32.abs() < GIMBAL_THRESHOLD {
                    self.y = (-m31).atan2(m33);
                    self.z = (-m12).atan2(m22);
                } else {
                    self.y = 0.0;
                    self.z = m21.atan2(m11);
                }
            }
            RotationOrder::ZYX => {
                self.y = (-clamp_unit(m31)).asin();
                if m31.abs() < GIMBAL_THRESHOLD {
                    self.x = m32.atan2(m33);
                    self.z = m21.atan2(m11);
                } else {
                    self.x = 0.0;
                    self.z = (-m12).atan2(m22);
                }
            }
            RotationOrder::YZX => {
                self.z = clamp_unit(m21).asin();
                if m21.abs() < GIMBAL_THRESHOLD {
                    self.x = (-m23).atan2(m22);
                    self.y = (-m31).atan2(m11);
                } else {
                    self.x = 0.0;
                    self.y = m13.atan2(m33);
                }
            }
            RotationOrder::XZY => {
                self.z = (-clamp_unit(m12)).asin();
                if m12.abs() < GIMBAL_THRESHOLD {
                    self.x = m32.atan2(m22);
                    self.y = m13.atan2(m11);
                } else {
                    self.x = (-m23).atan2(m33);
                    self.y = 0.0;
                }
            }
        }

        self.order = order;
    }
}

fn parse_order(name: &str, operation: &str) -> Result<RotationOrder, MathError> {
    name.parse::<RotationOrder>().map_err(|err| {
        log::warn!("Euler::{}: {}", operation, err);
        err
    })
}

impl Default for Euler {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, RotationOrder::default())
    }
}

/// Clones angles and order only; the copy starts with no callback and no pending changes
impl Clone for Euler {
    fn clone(&self) -> Self {
        Self::new(self.x, self.y, self.z, self.order)
    }
}

impl fmt::Debug for Euler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Euler")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .field("order", &self.order)
            .field("has_callback", &self.on_change.is_some())
            .finish()
    }
}

/// Equal when angles and order match exactly
impl PartialEq for Euler {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z && self.order == other.order
    }
}
