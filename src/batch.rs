//! Column batches: the unit of execution handed from producers to consumers.
//!
//! A batch is built once (columns populated, then [`ColumnBatch::set_num_rows`]
//! called exactly once) and is read-only afterwards. Once published it can be
//! shared across threads (e.g. behind an `Arc`) and read without locking.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::error::{check_index, IndexKind, Result, VectorError};
use crate::types::{DecimalData, TimestampData};
use crate::vector::{ArrayView, Bytes, ColumnVector, MapView, RowView};

/// Default number of rows per batch.
///
/// Chosen so one batch's working set typically fits in cache; it does not
/// affect correctness.
pub const DEFAULT_SIZE: usize = 2048;

/// Lifecycle state of a [`ColumnBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Columns may still be populated; no rows are readable.
    Building,
    /// The row count is published and the batch is immutable.
    Published,
}

/// A fixed-arity set of column vectors plus a published row count.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBatch {
    columns: Vec<ColumnVector>,
    num_rows: usize,
    state: BatchState,
}

macro_rules! cell_getter {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        ///
        /// # Errors
        ///
        /// Returns `IndexOutOfRange` if `row_id >= num_rows()` or
        /// `col_id >= arity()`, and `CapabilityMismatch` if the column is of
        /// another capability.
        #[inline]
        pub fn $name(&self, row_id: usize, col_id: usize) -> Result<$ty> {
            self.cell(row_id, col_id)?.$name(row_id)
        }
    };
}

impl ColumnBatch {
    /// Creates a batch in the building state over `columns`.
    ///
    /// Column order defines column indices.
    #[must_use]
    pub fn new(columns: Vec<ColumnVector>) -> Self {
        ColumnBatch {
            columns,
            num_rows: 0,
            state: BatchState::Building,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Returns the published row count (0 while building).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Returns true once the row count has been published.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.state == BatchState::Published
    }

    /// Returns the smallest column capacity, or `None` for a batch with no columns.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.columns.iter().map(ColumnVector::capacity).min()
    }

    /// Publishes the logical row count and freezes the batch.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyPublished` on a second call, or
    /// `RowCountExceedsCapacity` if any column holds fewer than `num_rows` rows.
    pub fn set_num_rows(&mut self, num_rows: usize) -> Result<()> {
        if self.is_published() {
            warn!(num_rows, published = self.num_rows, "rejected republish of column batch");
            return Err(VectorError::AlreadyPublished);
        }
        if let Some((column, vector)) = self
            .columns
            .iter()
            .enumerate()
            .find(|(_, v)| v.capacity() < num_rows)
        {
            warn!(num_rows, column, "row count exceeds column capacity");
            return Err(VectorError::RowCountExceedsCapacity {
                num_rows,
                column,
                capacity: vector.capacity(),
            });
        }
        self.num_rows = num_rows;
        self.state = BatchState::Published;
        debug!(arity = self.arity(), num_rows, "published column batch");
        Ok(())
    }

    /// Returns all columns in index order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnVector] {
        &self.columns
    }

    /// Returns column `col_id`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `col_id >= arity()`.
    pub fn column(&self, col_id: usize) -> Result<&ColumnVector> {
        check_index(IndexKind::Column, col_id, self.columns.len())?;
        Ok(&self.columns[col_id])
    }

    /// Returns column `col_id` for population.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyPublished` after [`ColumnBatch::set_num_rows`], or
    /// `IndexOutOfRange` if `col_id >= arity()`.
    pub fn column_mut(&mut self, col_id: usize) -> Result<&mut ColumnVector> {
        if self.is_published() {
            return Err(VectorError::AlreadyPublished);
        }
        check_index(IndexKind::Column, col_id, self.columns.len())?;
        Ok(&mut self.columns[col_id])
    }

    #[inline]
    fn cell(&self, row_id: usize, col_id: usize) -> Result<&ColumnVector> {
        check_index(IndexKind::Row, row_id, self.num_rows)?;
        check_index(IndexKind::Column, col_id, self.columns.len())?;
        Ok(&self.columns[col_id])
    }

    /// Returns whether the cell at `(row_id, col_id)` is null.
    ///
    /// Check this before any typed getter on a nullable column; a typed
    /// getter on a null cell returns the raw slot contents.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= num_rows()` or `col_id >= arity()`.
    #[inline]
    pub fn is_null_at(&self, row_id: usize, col_id: usize) -> Result<bool> {
        self.cell(row_id, col_id)?.is_null_at(row_id)
    }

    cell_getter!(
        /// Reads a boolean cell.
        get_boolean, bool
    );
    cell_getter!(
        /// Reads an 8-bit integer cell.
        get_byte, i8
    );
    cell_getter!(
        /// Reads a 16-bit integer cell.
        get_short, i16
    );
    cell_getter!(
        /// Reads a 32-bit integer cell.
        get_int, i32
    );
    cell_getter!(
        /// Reads a 64-bit integer cell.
        get_long, i64
    );
    cell_getter!(
        /// Reads a 32-bit float cell.
        get_float, f32
    );
    cell_getter!(
        /// Reads a 64-bit float cell.
        get_double, f64
    );

    /// Returns a zero-copy view of a bytes cell.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_byte_array(&self, row_id: usize, col_id: usize) -> Result<Bytes<'_>> {
        self.cell(row_id, col_id)?.get_bytes(row_id)
    }

    /// Returns a bytes cell as a standalone buffer.
    ///
    /// Borrows the column's backing buffer when the cell spans all of it and
    /// copies the cell's bytes otherwise.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_binary(&self, row_id: usize, col_id: usize) -> Result<Cow<'_, [u8]>> {
        Ok(self.get_byte_array(row_id, col_id)?.to_buffer())
    }

    /// Decodes a bytes cell as UTF-8.
    ///
    /// Only the cell's `[offset, offset + len)` slice is decoded. Malformed
    /// sequences become U+FFFD; well-formed text is borrowed without copying.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_string(&self, row_id: usize, col_id: usize) -> Result<Cow<'_, str>> {
        Ok(self.get_byte_array(row_id, col_id)?.to_str_lossy())
    }

    /// Reads a decimal cell with caller-supplied precision and scale.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_decimal(
        &self,
        row_id: usize,
        col_id: usize,
        precision: u8,
        scale: u8,
    ) -> Result<DecimalData> {
        self.cell(row_id, col_id)?.get_decimal(row_id, precision, scale)
    }

    /// Reads a timestamp cell as stored; `precision` does not alter the value.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_timestamp(
        &self,
        row_id: usize,
        col_id: usize,
        precision: u8,
    ) -> Result<TimestampData> {
        self.cell(row_id, col_id)?.get_timestamp(row_id, precision)
    }

    /// Returns a zero-copy view of an array cell.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_array(&self, row_id: usize, col_id: usize) -> Result<ArrayView<'_>> {
        self.cell(row_id, col_id)?.get_array(row_id)
    }

    /// Returns a positional view of a nested-row cell.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_row(&self, row_id: usize, col_id: usize) -> Result<RowView<'_>> {
        self.cell(row_id, col_id)?.get_row(row_id)
    }

    /// Returns zero-copy key/value views of a map cell.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `CapabilityMismatch`.
    pub fn get_map(&self, row_id: usize, col_id: usize) -> Result<MapView<'_>> {
        self.cell(row_id, col_id)?.get_map(row_id)
    }

    /// Returns a positional view of batch row `row_id` across all columns.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= num_rows()`.
    pub fn row(&self, row_id: usize) -> Result<RowView<'_>> {
        check_index(IndexKind::Row, row_id, self.num_rows)?;
        Ok(RowView::new(&self.columns, row_id))
    }
}
