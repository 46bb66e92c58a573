//! Fixed-width primitive vectors.

use arrow::buffer::{BooleanBuffer, ScalarBuffer};
use arrow::datatypes::ArrowNativeType;

use crate::error::{check_index, check_range, IndexKind, Result, VectorError};

use super::nulls::{Bitmap, NullFlags};

/// Runs `f` over the buffer's values as an owned `Vec`.
///
/// Takes the allocation back without copying when the buffer is not shared,
/// and copies it otherwise.
pub(crate) fn update_buffer<T: ArrowNativeType, R>(
    buffer: &mut ScalarBuffer<T>,
    f: impl FnOnce(&mut Vec<T>) -> R,
) -> R {
    let taken = std::mem::replace(buffer, ScalarBuffer::from(Vec::new())).into_inner();
    let mut values = taken
        .into_vec::<T>()
        .unwrap_or_else(|shared| shared.typed_data::<T>().to_vec());
    let out = f(&mut values);
    *buffer = ScalarBuffer::from(values);
    out
}

/// A null-aware vector of fixed-width values stored in one arrow buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveVector<T: ArrowNativeType> {
    values: ScalarBuffer<T>,
    nulls: NullFlags,
}

/// 8-bit integer column storage.
pub type ByteVector = PrimitiveVector<i8>;
/// 16-bit integer column storage.
pub type ShortVector = PrimitiveVector<i16>;
/// 32-bit integer column storage.
pub type IntVector = PrimitiveVector<i32>;
/// 64-bit integer column storage.
pub type LongVector = PrimitiveVector<i64>;
/// 32-bit float column storage.
pub type FloatVector = PrimitiveVector<f32>;
/// 64-bit float column storage.
pub type DoubleVector = PrimitiveVector<f64>;

impl<T: ArrowNativeType> PrimitiveVector<T> {
    /// Creates a vector of `capacity` zeroed, non-null rows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        PrimitiveVector {
            values: ScalarBuffer::from(vec![T::default(); capacity]),
            nulls: NullFlags::new(capacity),
        }
    }

    /// Creates a dense vector whose capacity equals `values.len()`.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Self {
        let nulls = NullFlags::new(values.len());
        PrimitiveVector {
            values: ScalarBuffer::from(values),
            nulls,
        }
    }

    /// Creates a vector from optional values; `None` rows are null.
    ///
    /// Null slots hold `T::default()`.
    #[must_use]
    pub fn from_options(values: &[Option<T>]) -> Self {
        let raw: Vec<T> = values.iter().map(|v| v.unwrap_or_default()).collect();
        PrimitiveVector {
            values: ScalarBuffer::from(raw),
            nulls: NullFlags::from_flags(values.iter().map(Option::is_none)),
        }
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Returns the backing arrow buffer.
    #[must_use]
    pub fn values(&self) -> &ScalarBuffer<T> {
        &self.values
    }

    /// Returns the null flags.
    #[must_use]
    pub fn nulls(&self) -> &NullFlags {
        &self.nulls
    }

    /// Returns whether `row_id` is null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.nulls.is_null(row_id)
    }

    /// Returns the raw value at `row_id`.
    ///
    /// A null row yields whatever the producer left in the slot
    /// (`T::default()` unless overwritten).
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn get(&self, row_id: usize) -> Result<T> {
        self.values
            .get(row_id)
            .copied()
            .ok_or_else(|| VectorError::row_out_of_range(row_id, self.values.len()))
    }

    /// Returns the raw values in `[start, start + len)`.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the range exceeds capacity.
    pub fn slice(&self, start: usize, len: usize) -> Result<&[T]> {
        check_range(start, len, self.values.len())?;
        Ok(&self.values[start..start + len])
    }

    /// Copies the raw values in `[start, start + len)`.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the range exceeds capacity.
    pub fn copy_range(&self, start: usize, len: usize) -> Result<Vec<T>> {
        Ok(self.slice(start, len)?.to_vec())
    }

    /// Writes a non-null value at `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set(&mut self, row_id: usize, value: T) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.values.len())?;
        update_buffer(&mut self.values, |values| values[row_id] = value);
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

    /// Writes `value` into every row.
    pub fn fill(&mut self, value: T) {
        update_buffer(&mut self.values, |values| values.fill(value));
    }

    /// Runs `f` over the raw storage for bulk population.
    pub fn update_values<R>(&mut self, f: impl FnOnce(&mut [T]) -> R) -> R {
        update_buffer(&mut self.values, |values| f(values))
    }
}

/// A null-aware vector of booleans, bit-packed like its null markers.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanVector {
    values: Bitmap,
    nulls: NullFlags,
}

impl BooleanVector {
    /// Creates a vector of `capacity` false, non-null rows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        BooleanVector {
            values: Bitmap::new(capacity, false),
            nulls: NullFlags::new(capacity),
        }
    }

    /// Creates a dense vector whose capacity equals `values.len()`.
    #[must_use]
    pub fn from_values(values: Vec<bool>) -> Self {
        let nulls = NullFlags::new(values.len());
        BooleanVector {
            values: Bitmap::from_bits(values),
            nulls,
        }
    }

    /// Creates a vector from optional values; `None` rows are null and false.
    #[must_use]
    pub fn from_options(values: &[Option<bool>]) -> Self {
        BooleanVector {
            values: Bitmap::from_bits(values.iter().map(|v| v.unwrap_or_default())),
            nulls: NullFlags::from_flags(values.iter().map(Option::is_none)),
        }
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Freezes the values into an arrow [`BooleanBuffer`].
    #[must_use]
    pub fn values(&self) -> BooleanBuffer {
        self.values.freeze()
    }

    /// Returns the null flags.
    #[must_use]
    pub fn nulls(&self) -> &NullFlags {
        &self.nulls
    }

    /// Returns whether `row_id` is null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.nulls.is_null(row_id)
    }

    /// Returns the raw value at `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn get(&self, row_id: usize) -> Result<bool> {
        check_index(IndexKind::Row, row_id, self.values.len())?;
        Ok(self.values.get(row_id))
    }

    /// Copies the raw values in `[start, start + len)`.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the range exceeds capacity.
    pub fn copy_range(&self, start: usize, len: usize) -> Result<Vec<bool>> {
        check_range(start, len, self.values.len())?;
        Ok((start..start + len).map(|i| self.values.get(i)).collect())
    }

    /// Writes a non-null value at `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set(&mut self, row_id: usize, value: bool) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.values.len())?;
        self.values.set(row_id, value);
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

    /// Writes `value` into every row.
    pub fn fill(&mut self, value: bool) {
        self.values = Bitmap::new(self.values.len(), value);
    }
}
