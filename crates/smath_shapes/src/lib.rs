//! Bounding volumes and primitives for the smath kernel
//!
//! These consume the vector and matrix types from `smath_linalg` and answer
//! containment and intersection queries between each other.
//!
//! - [`Box2`], [`Box3`] - axis-aligned boxes
//! - [`Sphere`] - center and radius
//! - [`Plane`] - infinite plane, `normal . p + constant = 0`
//! - [`Line3`] - finite segment

mod box2;
mod box3;
mod line3;
mod plane;
mod sphere;

pub use box2::Box2;
pub use box3::Box3;
pub use line3::Line3;
pub use plane::Plane;
pub use sphere::Sphere;
