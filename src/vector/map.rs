//! Map vectors: per-row spans over parallel key and value children.

use crate::error::{check_index, IndexKind, Result, VectorError};

use super::array::{ArrayView, Spans};
use super::nulls::NullFlags;
use super::ColumnVector;

/// A null-aware map vector.
///
/// Row `i` holds the entries `keys[j], values[j]` for `j` in
/// `[offsets[i], offsets[i] + lengths[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapVector {
    spans: Spans,
    keys: Box<ColumnVector>,
    values: Box<ColumnVector>,
    size: usize,
    nulls: NullFlags,
}

impl MapVector {
    /// Creates a map vector of `capacity` rows over the given children.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the key and value children differ in capacity.
    pub fn new(capacity: usize, keys: ColumnVector, values: ColumnVector) -> Result<Self> {
        if keys.capacity() != values.capacity() {
            return Err(VectorError::LengthMismatch {
                expected: keys.capacity(),
                actual: values.capacity(),
            });
        }
        Ok(MapVector {
            spans: Spans::new(capacity),
            keys: Box::new(keys),
            values: Box::new(values),
            size: 0,
            nulls: NullFlags::new(capacity),
        })
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.spans.capacity()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    #[must_use]
    pub fn keys(&self) -> &ColumnVector {
        &self.keys
    }

    #[must_use]
    pub fn values(&self) -> &ColumnVector {
        &self.values
    }

    #[must_use]
    pub fn nulls(&self) -> &NullFlags {
        &self.nulls
    }

    /// Returns whether `row_id` is null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.nulls.is_null(row_id)
    }

    /// Points row `row_id` at entries `[offset, offset + length)`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `InvalidSpan`.
    pub fn set_span(&mut self, row_id: usize, offset: i64, length: i64) -> Result<()> {
        self.spans.set(row_id, offset, length, self.keys.capacity())?;
        self.nulls.set_not_null(row_id)
    }

    /// Marks `row_id` as null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set_null(&mut self, row_id: usize) -> Result<()> {
        self.nulls.set_null(row_id)
    }

    /// Returns zero-copy key and value views for row `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`, or `InvalidSpan` if
    /// the stored span exceeds the children.
    pub fn get_map(&self, row_id: usize) -> Result<MapView<'_>> {
        check_index(IndexKind::Row, row_id, self.capacity())?;
        let (offset, len) = self.spans.resolve(row_id, self.keys.capacity())?;
        Ok(MapView {
            keys: ArrayView::new(&self.keys, offset, len)?,
            values: ArrayView::new(&self.values, offset, len)?,
        })
    }

    /// Checks the spans of every non-null populated row.
    ///
    /// # Errors
    ///
    /// Returns the first `InvalidSpan` found.
    pub fn validate(&self) -> Result<()> {
        for row_id in 0..self.size.min(self.capacity()) {
            if !self.nulls.is_null(row_id)? {
                self.spans.resolve(row_id, self.keys.capacity())?;
            }
        }
        Ok(())
    }
}

/// Paired key and value views of one map cell.
#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    keys: ArrayView<'a>,
    values: ArrayView<'a>,
}

impl<'a> MapView<'a> {
    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys as an array view.
    #[must_use]
    pub fn key_array(&self) -> ArrayView<'a> {
        self.keys
    }

    /// Returns the values as an array view.
    #[must_use]
    pub fn value_array(&self) -> ArrayView<'a> {
        self.values
    }
}
