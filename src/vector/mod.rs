//! Column vectors: typed, null-aware, fixed-capacity column storage.
//!
//! This module provides:
//! - Heap vectors per capability ([`PrimitiveVector`], [`BytesVector`],
//!   [`DecimalVector`], [`TimestampVector`])
//! - Nested vectors ([`ArrayVector`], [`MapVector`], [`RowVector`])
//! - Zero-copy views over nested cells ([`ArrayView`], [`MapView`], [`RowView`])
//! - [`ColumnVector`], the sum type a batch dispatches on
//!
//! Every getter takes a row index and returns `IndexOutOfRange` outside
//! `[0, capacity)`. Typed getters on [`ColumnVector`] return
//! `CapabilityMismatch` when called on the wrong variant. A typed getter on a
//! null row returns the raw slot contents; callers check `is_null_at` first.

mod access;
mod array;
mod bytes;
mod decimal;
mod map;
mod nulls;
mod primitive;
mod row;

pub use access::ElementAccess;
pub use array::{ArrayVector, ArrayView};
pub use bytes::{Bytes, BytesVector};
pub use decimal::{DecimalVector, TimestampVector};
pub use map::{MapVector, MapView};
pub use nulls::NullFlags;
pub use primitive::{
    BooleanVector, ByteVector, DoubleVector, FloatVector, IntVector, LongVector, PrimitiveVector,
    ShortVector,
};
pub use row::{RowVector, RowView};

use crate::error::{Result, VectorError};
use crate::types::{Capability, DecimalData, TimestampData};

/// A column vector of one of the supported capabilities.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnVector {
    Boolean(BooleanVector),
    Byte(ByteVector),
    Short(ShortVector),
    Int(IntVector),
    Long(LongVector),
    Float(FloatVector),
    Double(DoubleVector),
    Bytes(BytesVector),
    Decimal(DecimalVector),
    Timestamp(TimestampVector),
    Array(ArrayVector),
    Map(MapVector),
    Row(RowVector),
}

macro_rules! primitive_getter {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        ///
        /// # Errors
        ///
        /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
        #[inline]
        pub fn $name(&self, row_id: usize) -> Result<$ty> {
            match self {
                ColumnVector::$variant(v) => v.get(row_id),
                other => Err(other.mismatch(Capability::$variant)),
            }
        }
    };
}

impl ColumnVector {
    /// Returns the capability this vector supports.
    #[must_use]
    pub fn capability(&self) -> Capability {
        match self {
            ColumnVector::Boolean(_) => Capability::Boolean,
            ColumnVector::Byte(_) => Capability::Byte,
            ColumnVector::Short(_) => Capability::Short,
            ColumnVector::Int(_) => Capability::Int,
            ColumnVector::Long(_) => Capability::Long,
            ColumnVector::Float(_) => Capability::Float,
            ColumnVector::Double(_) => Capability::Double,
            ColumnVector::Bytes(_) => Capability::Bytes,
            ColumnVector::Decimal(_) => Capability::Decimal,
            ColumnVector::Timestamp(_) => Capability::Timestamp,
            ColumnVector::Array(_) => Capability::Array,
            ColumnVector::Map(_) => Capability::Map,
            ColumnVector::Row(_) => Capability::Row,
        }
    }

    /// Returns the null flags.
    #[must_use]
    pub fn nulls(&self) -> &NullFlags {
        match self {
            ColumnVector::Boolean(v) => v.nulls(),
            ColumnVector::Byte(v) => v.nulls(),
            ColumnVector::Short(v) => v.nulls(),
            ColumnVector::Int(v) => v.nulls(),
            ColumnVector::Long(v) => v.nulls(),
            ColumnVector::Float(v) => v.nulls(),
            ColumnVector::Double(v) => v.nulls(),
            ColumnVector::Bytes(v) => v.nulls(),
            ColumnVector::Decimal(v) => v.nulls(),
            ColumnVector::Timestamp(v) => v.nulls(),
            ColumnVector::Array(v) => v.nulls(),
            ColumnVector::Map(v) => v.nulls(),
            ColumnVector::Row(v) => v.nulls(),
        }
    }

    /// Returns the fixed capacity (rows the vector can hold).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nulls().capacity()
    }

    /// Returns whether `row_id` is null. Valid for every variant.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.nulls().is_null(row_id)
    }

    pub(crate) fn mismatch(&self, requested: Capability) -> VectorError {
        VectorError::CapabilityMismatch {
            requested,
            actual: self.capability(),
        }
    }

    primitive_getter!(
        /// Reads a boolean.
        get_boolean, Boolean, bool
    );
    primitive_getter!(
        /// Reads an 8-bit integer.
        get_byte, Byte, i8
    );
    primitive_getter!(
        /// Reads a 16-bit integer.
        get_short, Short, i16
    );
    primitive_getter!(
        /// Reads a 32-bit integer.
        get_int, Int, i32
    );
    primitive_getter!(
        /// Reads a 64-bit integer.
        get_long, Long, i64
    );
    primitive_getter!(
        /// Reads a 32-bit float.
        get_float, Float, f32
    );
    primitive_getter!(
        /// Reads a 64-bit float.
        get_double, Double, f64
    );

    /// Returns a zero-copy view of the row's bytes.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    #[inline]
    pub fn get_bytes(&self, row_id: usize) -> Result<Bytes<'_>> {
        match self {
            ColumnVector::Bytes(v) => v.get_bytes(row_id),
            other => Err(other.mismatch(Capability::Bytes)),
        }
    }

    /// Reads a decimal, attaching the caller-supplied precision and scale.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_decimal(&self, row_id: usize, precision: u8, scale: u8) -> Result<DecimalData> {
        match self {
            ColumnVector::Decimal(v) => v.get_decimal(row_id, precision, scale),
            other => Err(other.mismatch(Capability::Decimal)),
        }
    }

    /// Reads a timestamp as stored; `precision` does not alter the value.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_timestamp(&self, row_id: usize, precision: u8) -> Result<TimestampData> {
        match self {
            ColumnVector::Timestamp(v) => v.get_timestamp(row_id, precision),
            other => Err(other.mismatch(Capability::Timestamp)),
        }
    }

    /// Returns a zero-copy view of the row's array elements.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange`, `CapabilityMismatch`, or the construction
    /// errors of [`ArrayVector::get_array`].
    pub fn get_array(&self, row_id: usize) -> Result<ArrayView<'_>> {
        match self {
            ColumnVector::Array(v) => v.get_array(row_id),
            other => Err(other.mismatch(Capability::Array)),
        }
    }

    /// Returns zero-copy key/value views of the row's map entries.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange`, `CapabilityMismatch`, or `InvalidSpan`.
    pub fn get_map(&self, row_id: usize) -> Result<MapView<'_>> {
        match self {
            ColumnVector::Map(v) => v.get_map(row_id),
            other => Err(other.mismatch(Capability::Map)),
        }
    }

    /// Returns a positional view of the nested row.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_row(&self, row_id: usize) -> Result<RowView<'_>> {
        match self {
            ColumnVector::Row(v) => v.get_row(row_id),
            other => Err(other.mismatch(Capability::Row)),
        }
    }
}

macro_rules! impl_from_vector {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ColumnVector {
                fn from(vector: $ty) -> Self {
                    ColumnVector::$variant(vector)
                }
            }
        )*
    };
}

impl_from_vector!(
    Boolean => BooleanVector,
    Byte => ByteVector,
    Short => ShortVector,
    Int => IntVector,
    Long => LongVector,
    Float => FloatVector,
    Double => DoubleVector,
    Bytes => BytesVector,
    Decimal => DecimalVector,
    Timestamp => TimestampVector,
    Array => ArrayVector,
    Map => MapVector,
    Row => RowVector,
);
