//! Bit-packed null markers shared by every vector variant.

use std::fmt;

use arrow::array::BooleanBufferBuilder;
use arrow::buffer::{BooleanBuffer, NullBuffer};

use crate::error::{check_index, check_range, IndexKind, Result};

/// A mutable, fixed-length bitmap.
pub(crate) struct Bitmap(BooleanBufferBuilder);

impl Bitmap {
    /// Creates `len` bits, all set to `value`.
    pub(crate) fn new(len: usize, value: bool) -> Self {
        let mut bits = BooleanBufferBuilder::new(len);
        bits.append_n(len, value);
        Bitmap(bits)
    }

    pub(crate) fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let bits = bits.into_iter();
        let mut builder = BooleanBufferBuilder::new(bits.size_hint().0);
        for bit in bits {
            builder.append(bit);
        }
        Bitmap(builder)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Callers bound-check `index` first.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> bool {
        self.0.get_bit(index)
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, value: bool) {
        self.0.set_bit(index, value);
    }

    /// Freezes a copy of the bits into an immutable arrow buffer.
    pub(crate) fn freeze(&self) -> BooleanBuffer {
        self.0.finish_cloned()
    }
}

impl Clone for Bitmap {
    fn clone(&self) -> Self {
        let mut bits = BooleanBufferBuilder::new(self.len());
        bits.append_buffer(&self.freeze());
        Bitmap(bits)
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.freeze() == other.freeze()
    }
}

impl Eq for Bitmap {}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.freeze().iter()).finish()
    }
}

/// Null markers for a fixed-capacity vector.
///
/// Stored as an arrow validity bitmap (set bit = non-null). The bitmap is only
/// materialized once a row is marked null, so dense columns answer reads from
/// the `no_nulls` fast path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullFlags {
    capacity: usize,
    validity: Option<Bitmap>,
}

impl NullFlags {
    /// Creates flags for `capacity` rows, all non-null.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        NullFlags {
            capacity,
            validity: None,
        }
    }

    /// Creates flags from an explicit per-row sequence (`true` = null).
    #[must_use]
    pub fn from_flags<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        let validity = Bitmap::from_bits(flags.into_iter().map(|null| !null));
        let capacity = validity.len();
        let has_nulls = validity.freeze().count_set_bits() < capacity;
        NullFlags {
            capacity,
            validity: has_nulls.then_some(validity),
        }
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no row has been marked null.
    #[must_use]
    pub fn no_nulls(&self) -> bool {
        self.validity.is_none()
    }

    /// Returns whether `row_id` is null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn is_null(&self, row_id: usize) -> Result<bool> {
        check_index(IndexKind::Row, row_id, self.capacity)?;
        Ok(self.validity.as_ref().is_some_and(|v| !v.get(row_id)))
    }

    /// Marks `row_id` as null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set_null(&mut self, row_id: usize) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.capacity)?;
        self.validity_mut().set(row_id, false);
        Ok(())
    }

    /// Clears the null marker of `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set_not_null(&mut self, row_id: usize) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.capacity)?;
        if let Some(validity) = self.validity.as_mut() {
            validity.set(row_id, true);
        }
        Ok(())
    }

    /// Marks every row in `[start, start + count)` as null.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the range exceeds capacity.
    pub fn set_nulls(&mut self, start: usize, count: usize) -> Result<()> {
        check_range(start, count, self.capacity)?;
        if count == 0 {
            return Ok(());
        }
        let validity = self.validity_mut();
        for row_id in start..start + count {
            validity.set(row_id, false);
        }
        Ok(())
    }

    /// Freezes the markers into an arrow [`NullBuffer`], or `None` when no row
    /// is null.
    #[must_use]
    pub fn to_null_buffer(&self) -> Option<NullBuffer> {
        self.validity.as_ref().map(|v| NullBuffer::new(v.freeze()))
    }

    /// Returns the number of null rows among the first `rows` rows.
    #[must_use]
    pub fn null_count(&self, rows: usize) -> usize {
        self.to_null_buffer()
            .map_or(0, |nulls| nulls.slice(0, rows.min(self.capacity)).null_count())
    }

    fn validity_mut(&mut self) -> &mut Bitmap {
        let capacity = self.capacity;
        self.validity.get_or_insert_with(|| Bitmap::new(capacity, true))
    }
}
