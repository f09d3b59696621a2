//! smath - a small geometric and linear-algebra kernel
//!
//! Re-exports the vector, matrix and rotation types from [`smath_linalg`] and
//! the bounding volumes from [`smath_shapes`], plus the [`config`] module
//! that loads kernel-wide settings.
//!
//! ```
//! use smath::{Box3, Euler, Mat4, RotationOrder, Vec3};
//!
//! let rotation = Euler::new(0.0, std::f32::consts::FRAC_PI_2, 0.0, RotationOrder::XYZ);
//! let mut bounds = Box3::new(Vec3::ZERO, Vec3::ONE);
//! bounds.apply_mat4(&Mat4::from_euler(&rotation));
//! assert!(bounds.contains_point(Vec3::new(0.5, 0.5, -0.5)));
//! ```

pub mod config;

pub use smath_linalg::{
    attribute, error, euler, scalar, BufferAttribute, Euler, EulerChange, InterleavedBuffer,
    Mat3, Mat4, MathError, Quat, RotationOrder, SingularPolicy, Vec2, Vec3, Vec4,
};
pub use smath_shapes::{Box2, Box3, Line3, Plane, Sphere};

pub use config::{ConfigError, KernelConfig};
