//! Variable-length byte vectors over a shared buffer.

use std::borrow::Cow;

use arrow::buffer::Buffer;

use crate::error::{check_index, check_range, IndexKind, Result, VectorError};

use super::array::{span_value, Spans};
use super::nulls::NullFlags;

/// A zero-copy view of one row's bytes inside a vector's backing buffer.
///
/// The row's bytes are `data[offset..offset + len]`; the range is checked
/// when the view is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'a> {
    data: &'a [u8],
    offset: usize,
    len: usize,
}

impl<'a> Bytes<'a> {
    /// Creates a view of `data[offset..offset + len]`.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the range exceeds `data`.
    pub fn new(data: &'a [u8], offset: usize, len: usize) -> Result<Self> {
        check_range(offset, len, data.len())?;
        Ok(Bytes { data, offset, len })
    }

    /// Returns the whole backing buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the start of the row's bytes within the backing buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of bytes in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the row's bytes without copying.
    #[must_use]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.offset..self.offset + self.len]
    }

    /// Returns true if the view covers its entire backing buffer.
    ///
    /// When it does, the backing buffer can stand in for a dedicated copy.
    #[must_use]
    pub fn spans_backing(&self) -> bool {
        self.len == self.data.len()
    }

    /// Copies the row's bytes into a standalone buffer.
    #[must_use]
    pub fn get_bytes(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Returns the bytes as a standalone buffer, borrowing the backing buffer
    /// when the view already spans it and copying otherwise.
    #[must_use]
    pub fn to_buffer(&self) -> Cow<'a, [u8]> {
        if self.spans_backing() {
            Cow::Borrowed(self.data)
        } else {
            Cow::Owned(self.get_bytes())
        }
    }

    /// Decodes the row's bytes as UTF-8.
    ///
    /// Malformed sequences are replaced with U+FFFD. Valid input is borrowed
    /// from the backing buffer without allocating.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.as_slice())
    }

    /// Returns true if the row holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A null-aware vector of variable-length byte strings.
///
/// All rows share one arrow buffer; each row records its start and length.
#[derive(Debug, Clone, PartialEq)]
pub struct BytesVector {
    data: Buffer,
    spans: Spans,
    nulls: NullFlags,
}

impl BytesVector {
    /// Creates a vector of `capacity` empty, non-null rows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        BytesVector {
            data: Buffer::from_vec(Vec::<u8>::new()),
            spans: Spans::new(capacity),
            nulls: NullFlags::new(capacity),
        }
    }

    /// Creates a vector holding `values` in order, one row per value.
    #[must_use]
    pub fn from_values<B: AsRef<[u8]>>(values: &[B]) -> Self {
        Self::build(values.iter().map(|v| Some(v.as_ref())), values.len())
    }

    /// Creates a vector from optional values; `None` rows are null and empty.
    #[must_use]
    pub fn from_options<B: AsRef<[u8]>>(values: &[Option<B>]) -> Self {
        let mut vector = Self::build(
            values.iter().map(|v| v.as_ref().map(|b| b.as_ref())),
            values.len(),
        );
        vector.nulls = NullFlags::from_flags(values.iter().map(Option::is_none));
        vector
    }

    /// Creates a vector over an existing buffer with explicit per-row spans.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if `offsets` and `lengths` differ in length, or
    /// `InvalidSpan` if any span falls outside `data`.
    pub fn from_parts(data: Buffer, offsets: &[i64], lengths: &[i64]) -> Result<Self> {
        if offsets.len() != lengths.len() {
            return Err(VectorError::LengthMismatch {
                expected: offsets.len(),
                actual: lengths.len(),
            });
        }
        let mut spans = Spans::new(offsets.len());
        for (row_id, (&offset, &length)) in offsets.iter().zip(lengths).enumerate() {
            spans.set(row_id, offset, length, data.len())?;
        }
        let nulls = NullFlags::new(offsets.len());
        Ok(BytesVector { data, spans, nulls })
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.spans.capacity()
    }

    /// Returns the shared backing buffer.
    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.data
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

    /// Returns a zero-copy view of row `row_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    #[inline]
    pub fn get_bytes(&self, row_id: usize) -> Result<Bytes<'_>> {
        let (offset, len) = self.spans.resolve(row_id, self.data.len())?;
        Ok(Bytes {
            data: self.data.as_slice(),
            offset,
            len,
        })
    }

    /// Appends `value` to the buffer and points row `row_id` at it.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set(&mut self, row_id: usize, value: &[u8]) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.capacity())?;
        let data = std::mem::replace(&mut self.data, Buffer::from_vec(Vec::<u8>::new()));
        let mut bytes = data
            .into_vec::<u8>()
            .unwrap_or_else(|shared| shared.as_slice().to_vec());
        let start = bytes.len();
        bytes.extend_from_slice(value);
        self.data = Buffer::from_vec(bytes);
        self.spans.set(row_id, span_value(start), span_value(value.len()), self.data.len())?;
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

    /// Concatenates `values` into one buffer; `None` rows stay empty.
    fn build<'v, I>(values: I, capacity: usize) -> Self
    where
        I: Iterator<Item = Option<&'v [u8]>> + Clone,
    {
        let total = values.clone().flatten().map(<[u8]>::len).sum();
        let mut bytes = Vec::with_capacity(total);
        let mut spans = Spans::new(capacity);
        for (row_id, value) in values.enumerate() {
            if let Some(value) = value {
                let start = bytes.len();
                bytes.extend_from_slice(value);
                spans.put(row_id, span_value(start), span_value(value.len()));
            }
        }
        BytesVector {
            data: Buffer::from_vec(bytes),
            spans,
            nulls: NullFlags::new(capacity),
        }
    }
}
