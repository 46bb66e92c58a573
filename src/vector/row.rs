//! Row (struct) vectors: one child vector per field, aligned by row index.

use crate::error::{check_index, IndexKind, Result, VectorError};

use super::access::ElementAccess;
use super::nulls::NullFlags;
use super::ColumnVector;

/// A null-aware vector of nested rows.
///
/// Field `f` of row `i` is row `i` of `fields[f]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowVector {
    fields: Vec<ColumnVector>,
    nulls: NullFlags,
}

impl RowVector {
    /// Creates a row vector of `capacity` rows over `fields`.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if any field holds fewer than `capacity` rows.
    pub fn new(capacity: usize, fields: Vec<ColumnVector>) -> Result<Self> {
        if let Some(short) = fields.iter().find(|f| f.capacity() < capacity) {
            return Err(VectorError::LengthMismatch {
                expected: capacity,
                actual: short.capacity(),
            });
        }
        Ok(RowVector {
            fields,
            nulls: NullFlags::new(capacity),
        })
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nulls.capacity()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn fields(&self) -> &[ColumnVector] {
        &self.fields
    }

    /// Returns field `pos` mutably for population.
    pub fn field_mut(&mut self, pos: usize) -> Option<&mut ColumnVector> {
        self.fields.get_mut(pos)
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

    /// Marks `row_id` as null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set_null(&mut self, row_id: usize) -> Result<()> {
        self.nulls.set_null(row_id)
    }

    /// Returns a positional view of row `row_id`'s fields.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn get_row(&self, row_id: usize) -> Result<RowView<'_>> {
        check_index(IndexKind::Row, row_id, self.capacity())?;
        Ok(RowView::new(&self.fields, row_id))
    }
}

/// A zero-copy view of one nested row; position `f` reads field `f`.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    fields: &'a [ColumnVector],
    row_id: usize,
}

impl<'a> RowView<'a> {
    pub(crate) fn new(fields: &'a [ColumnVector], row_id: usize) -> Self {
        RowView { fields, row_id }
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Returns the row index shared by all fields.
    #[must_use]
    pub fn row_id(&self) -> usize {
        self.row_id
    }
}

impl<'a> ElementAccess<'a> for RowView<'a> {
    fn num_elements(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    fn locate(&self, pos: usize) -> Result<(&'a ColumnVector, usize)> {
        let field = self.fields.get(pos).ok_or(VectorError::IndexOutOfRange {
            kind: IndexKind::Field,
            index: pos,
            bound: self.fields.len(),
        })?;
        Ok((field, self.row_id))
    }
}
