//! Linear Algebra Library
//!
//! This crate provides the vector, matrix and rotation types of the smath kernel.
//!
//! ## Core Types
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - fixed-size `f32` vectors
//! - [`Mat3`], [`Mat4`] - column-major square matrices
//! - [`Quat`] - rotation quaternion
//! - [`Euler`] - three angles plus a [`RotationOrder`]
//!
//! ## Interop
//!
//! - [`BufferAttribute`] - per-element access to externally owned vertex data
//! - [`InterleavedBuffer`] - a `Vec<f32>` implementation of it
//!
//! Matrix inversion of a singular matrix is governed by [`SingularPolicy`].

mod vec2;
mod vec3;
mod vec4;
mod mat3;
mod mat4;
mod quat;
pub mod attribute;
pub mod error;
pub mod euler;
pub mod scalar;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::Quat;
pub use attribute::{BufferAttribute, InterleavedBuffer};
pub use error::{MathError, SingularPolicy};
pub use euler::{Euler, EulerChange, RotationOrder};
