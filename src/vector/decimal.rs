//! Decimal and timestamp vectors.
//!
//! Both store raw numbers only. Precision and scale arrive with each read and
//! never change the stored value.

use arrow::buffer::ScalarBuffer;

use crate::error::{check_index, IndexKind, Result};
use crate::types::{DecimalData, TimestampData};

use super::nulls::NullFlags;
use super::primitive::{update_buffer, PrimitiveVector};

/// A null-aware vector of unscaled decimal values.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalVector {
    unscaled: PrimitiveVector<i128>,
}

impl DecimalVector {
    /// Creates a vector of `capacity` zero, non-null rows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        DecimalVector {
            unscaled: PrimitiveVector::new(capacity),
        }
    }

    /// Creates a vector from optional unscaled values; `None` rows are null.
    #[must_use]
    pub fn from_unscaled(values: &[Option<i128>]) -> Self {
        DecimalVector {
            unscaled: PrimitiveVector::from_options(values),
        }
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.unscaled.capacity()
    }

    /// Returns the null flags.
    #[must_use]
    pub fn nulls(&self) -> &NullFlags {
        self.unscaled.nulls()
    }

    /// Returns whether `row_id` is null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.unscaled.is_null_at(row_id)
    }

    /// Reads row `row_id` as a decimal with the given precision and scale.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn get_decimal(&self, row_id: usize, precision: u8, scale: u8) -> Result<DecimalData> {
        let unscaled = self.unscaled.get(row_id)?;
        Ok(DecimalData::from_unscaled(unscaled, precision, scale))
    }

    /// Writes an unscaled value at `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set(&mut self, row_id: usize, unscaled: i128) -> Result<()> {
        self.unscaled.set(row_id, unscaled)
    }

    /// Marks `row_id` as null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set_null(&mut self, row_id: usize) -> Result<()> {
        self.unscaled.set_null(row_id)
    }
}

/// A null-aware vector of timestamps stored as epoch millisecond plus
/// nano-of-millisecond.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampVector {
    milliseconds: ScalarBuffer<i64>,
    nanos_of_millisecond: ScalarBuffer<i32>,
    nulls: NullFlags,
}

impl TimestampVector {
    /// Creates a vector of `capacity` epoch-zero, non-null rows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        TimestampVector {
            milliseconds: ScalarBuffer::from(vec![0; capacity]),
            nanos_of_millisecond: ScalarBuffer::from(vec![0; capacity]),
            nulls: NullFlags::new(capacity),
        }
    }

    /// Creates a vector from optional timestamps; `None` rows are null.
    #[must_use]
    pub fn from_options(values: &[Option<TimestampData>]) -> Self {
        let stored = || values.iter().map(|v| v.unwrap_or_default());
        TimestampVector {
            milliseconds: stored().map(|ts| ts.millisecond()).collect::<Vec<_>>().into(),
            nanos_of_millisecond: stored()
                .map(|ts| ts.nano_of_millisecond())
                .collect::<Vec<_>>()
                .into(),
            nulls: NullFlags::from_flags(values.iter().map(Option::is_none)),
        }
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.milliseconds.len()
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
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.nulls.is_null(row_id)
    }

    /// Reads row `row_id` exactly as stored.
    ///
    /// `precision` describes the column to the caller and does not alter the
    /// value; see [`TimestampData::truncate_to`] for explicit truncation.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn get_timestamp(&self, row_id: usize, _precision: u8) -> Result<TimestampData> {
        check_index(IndexKind::Row, row_id, self.capacity())?;
        Ok(TimestampData::from_epoch_millis(
            self.milliseconds[row_id],
            self.nanos_of_millisecond[row_id],
        ))
    }

    /// Writes a timestamp at `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set(&mut self, row_id: usize, value: TimestampData) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.capacity())?;
        update_buffer(&mut self.milliseconds, |ms| ms[row_id] = value.millisecond());
        update_buffer(&mut self.nanos_of_millisecond, |nanos| {
            nanos[row_id] = value.nano_of_millisecond();
        });
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
}
