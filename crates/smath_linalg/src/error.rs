//! Error types for the linear-algebra kernel
//!
//! Degenerate geometry (parallel lines, zero-length vectors, empty boxes) is not
//! an error; those cases resolve to `Option::None` or a documented sentinel.
//! The variants here are either recoverable numeric faults or programming
//! mistakes reported at the faulty call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the kernel
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// Inversion of a matrix whose determinant is zero
    #[error("can't invert matrix, determinant is {determinant}")]
    SingularMatrix { determinant: f32 },
    /// An Euler order name outside XYZ, YZX, ZXY, XZY, YXZ, ZYX
    #[error("unsupported rotation order: {0}")]
    UnsupportedRotationOrder(String),
    /// Component or slice access past the end
    #[error("index is out of range: {index} (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What to do when asked to invert a singular matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingularPolicy {
    /// Log a warning and substitute the identity matrix
    #[default]
    Permissive,
    /// Return [`MathError::SingularMatrix`] to the caller
    Strict,
}

/// Check that `len` values starting at `offset` fit inside a slice of `available` values
pub(crate) fn check_range(offset: usize, len: usize, available: usize) -> Result<(), MathError> {
    let end = offset.checked_add(len).unwrap_or(usize::MAX);
    if end > available {
        return Err(MathError::IndexOutOfRange {
            index: end.saturating_sub(1),
            len: available,
        });
    }
    Ok(())
}

/// Check that `count` elements of `stride` values starting at `offset` fit inside
/// `available` values; returns the number of values covered
pub(crate) fn check_strided_range(
    offset: usize,
    count: usize,
    stride: usize,
    available: usize,
) -> Result<usize, MathError> {
    let len = count.checked_mul(stride).ok_or(MathError::IndexOutOfRange {
        index: usize::MAX,
        len: available,
    })?;
    check_range(offset, len, available)?;
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_display() {
        let err = MathError::SingularMatrix { determinant: 0.0 };
        let msg = format!("{}", err);
        assert!(msg.contains("can't invert"));
        assert!(msg.contains("determinant is 0"));
    }

    #[test]
    fn test_unsupported_order_display() {
        let err = MathError::UnsupportedRotationOrder("XXY".to_string());
        assert!(format!("{}", err).contains("XXY"));
    }

    #[test]
    fn test_index_display() {
        let err = MathError::IndexOutOfRange { index: 3, len: 3 };
        let msg = format!("{}", err);
        assert!(msg.contains("out of range: 3"));
    }

    #[test]
    fn test_default_policy_is_permissive() {
        assert_eq!(SingularPolicy::default(), SingularPolicy::Permissive);
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(0, 3, 3).is_ok());
        assert!(check_range(1, 3, 6).is_ok());
        assert_eq!(
            check_range(4, 3, 6),
            Err(MathError::IndexOutOfRange { index: 6, len: 6 })
        );
    }

    #[test]
    fn test_check_strided_range() {
        assert_eq!(check_strided_range(3, 2, 3, 9), Ok(6));
        assert!(check_strided_range(3, 3, 3, 9).is_err());
        assert!(check_strided_range(0, usize::MAX / 2, 3, 6).is_err());
        assert!(check_strided_range(usize::MAX, 1, 3, 6).is_err());
    }
}
