//! Per-element buffer access
//!
//! Vertex data usually lives in externally owned, interleaved buffers. The
//! kernel only needs to read and write single components by element index, so
//! it depends on [`BufferAttribute`] rather than any concrete buffer type.

use crate::error::{check_range, MathError};

/// Read/write access to interleaved per-element data
pub trait BufferAttribute {
    /// Number of components per element (the stride in components)
    fn item_size(&self) -> usize;

    /// Number of elements in the buffer
    fn count(&self) -> usize;

    /// Read component `axis` of element `index`
    fn get_component(&self, index: usize, axis: usize) -> Result<f32, MathError>;

    /// Write component `axis` of element `index`
    fn set_component(&mut self, index: usize, axis: usize, value: f32) -> Result<(), MathError>;
}

/// A flat `Vec<f32>` viewed as elements of `item_size` components
#[derive(Clone, Debug, PartialEq)]
pub struct InterleavedBuffer {
    data: Vec<f32>,
    item_size: usize,
}

impl InterleavedBuffer {
    /// Wrap `data` as elements of `item_size` components
    ///
    /// Trailing values that don't fill a whole element are kept but never addressed.
    pub fn new(data: Vec<f32>, item_size: usize) -> Self {
        Self {
            data,
            item_size: item_size.max(1),
        }
    }

    /// Zero-filled buffer with room for `count` elements
    pub fn zeroed(count: usize, item_size: usize) -> Result<Self, MathError> {
        let len = count
            .checked_mul(item_size.max(1))
            .ok_or(MathError::IndexOutOfRange {
                index: count,
                len: usize::MAX / item_size.max(1),
            })?;
        Ok(Self::new(vec![0.0; len], item_size))
    }

    /// The underlying values
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the buffer and return its values
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    fn offset_of(&self, index: usize, axis: usize) -> Result<usize, MathError> {
        if axis >= self.item_size {
            return Err(MathError::IndexOutOfRange {
                index: axis,
                len: self.item_size,
            });
        }
        let offset = index
            .checked_mul(self.item_size)
            .and_then(|start| start.checked_add(axis))
            .ok_or(MathError::IndexOutOfRange {
                index,
                len: self.count(),
            })?;
        check_range(offset, 1, self.data.len())?;
        Ok(offset)
    }
}

impl BufferAttribute for InterleavedBuffer {
    fn item_size(&self) -> usize {
        self.item_size
    }

    fn count(&self) -> usize {
        self.data.len() / self.item_size
    }

    fn get_component(&self, index: usize, axis: usize) -> Result<f32, MathError> {
        let offset = self.offset_of(index, axis)?;
        Ok(self.data[offset])
    }

    fn set_component(&mut self, index: usize, axis: usize, value: f32) -> Result<(), MathError> {
        let offset = self.offset_of(index, axis)?;
        self.data[offset] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_item_size() {
        let buffer = InterleavedBuffer::new(vec![0.0; 10], 3);
        assert_eq!(buffer.item_size(), 3);
        assert_eq!(buffer.count(), 3);
    }

    #[test]
    fn test_get_set_component() {
        let mut buffer = InterleavedBuffer::zeroed(2, 3).unwrap();
        buffer.set_component(1, 2, 7.0).unwrap();
        assert_eq!(buffer.get_component(1, 2).unwrap(), 7.0);
        assert_eq!(buffer.as_slice()[5], 7.0);
    }

    #[test]
    fn test_axis_past_item_size_is_rejected() {
        let buffer = InterleavedBuffer::zeroed(2, 2).unwrap();
        assert_eq!(
            buffer.get_component(0, 2),
            Err(MathError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_index_past_count_is_rejected() {
        let mut buffer = InterleavedBuffer::zeroed(2, 3).unwrap();
        assert!(buffer.set_component(2, 0, 1.0).is_err());
    }

    #[test]
    fn test_huge_index_is_rejected() {
        let mut buffer = InterleavedBuffer::zeroed(2, 3).unwrap();
        assert!(matches!(
            buffer.get_component(usize::MAX, 0),
            Err(MathError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            buffer.set_component(usize::MAX / 2, 2, 1.0),
            Err(MathError::IndexOutOfRange { .. })
        ));
        assert_eq!(buffer.as_slice(), &[0.0; 6]);
    }

    #[test]
    fn test_zeroed_overflow_is_rejected() {
        assert!(matches!(
            InterleavedBuffer::zeroed(usize::MAX, 3),
            Err(MathError::IndexOutOfRange { .. })
        ));
    }
}
