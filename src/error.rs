//! Error types for colbatch vector and batch operations.

use thiserror::Error;

use crate::types::Capability;

/// Result type alias using [`VectorError`].
pub type Result<T> = std::result::Result<T, VectorError>;

/// Which coordinate an [`VectorError::IndexOutOfRange`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Row index into a vector or batch.
    Row,
    /// Column index into a batch.
    Column,
    /// Element index into an array view.
    Element,
    /// Field position into a row view.
    Field,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IndexKind::Row => "row",
            IndexKind::Column => "column",
            IndexKind::Element => "element",
            IndexKind::Field => "field",
        };
        f.write_str(name)
    }
}

/// Error types for colbatch operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    // ==================== Read Path Errors ====================
    /// A row, column, element or field coordinate fell outside its bound.
    #[error("Index out of range: {kind} {index} (bound {bound})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        bound: usize,
    },

    /// A typed getter was called against a vector variant that does not support it.
    #[error("Capability mismatch: requested {requested}, vector is {actual}")]
    CapabilityMismatch {
        requested: Capability,
        actual: Capability,
    },

    // ==================== Construction Errors ====================
    /// An (offset, length) span does not fit inside the child vector.
    #[error("Invalid span at row {row}: offset {offset}, length {length} (child capacity {child_capacity})")]
    InvalidSpan {
        row: usize,
        offset: i64,
        length: i64,
        child_capacity: usize,
    },

    /// A view range does not fit inside the vector it borrows from.
    #[error("View out of bounds: offset {offset}, length {len} (capacity {capacity})")]
    ViewOutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    /// A nested vector was read before its child vector was attached.
    #[error("Nested vector has no child vector attached")]
    MissingChild,

    /// The published row count exceeds a column's capacity.
    #[error("Row count {num_rows} exceeds capacity {capacity} of column {column}")]
    RowCountExceedsCapacity {
        num_rows: usize,
        column: usize,
        capacity: usize,
    },

    /// The batch has already been published and can no longer be modified.
    #[error("Batch already published")]
    AlreadyPublished,

    /// Parallel storage sequences disagree in length.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl VectorError {
    /// Builds an out-of-range error for a row coordinate.
    #[must_use]
    pub fn row_out_of_range(index: usize, bound: usize) -> Self {
        VectorError::IndexOutOfRange {
            kind: IndexKind::Row,
            index,
            bound,
        }
    }

    /// Returns true for the read-path contract violations.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            VectorError::IndexOutOfRange { .. } | VectorError::CapabilityMismatch { .. }
        )
    }
}

/// Checks that `[start, start + len)` lies within `[0, bound)`.
#[inline]
pub(crate) fn check_range(start: usize, len: usize, bound: usize) -> Result<()> {
    match start.checked_add(len) {
        Some(end) if end <= bound => Ok(()),
        _ => Err(VectorError::ViewOutOfBounds {
            offset: start,
            len,
            capacity: bound,
        }),
    }
}

/// Checks `index < bound`, producing an [`VectorError::IndexOutOfRange`] otherwise.
#[inline]
pub(crate) fn check_index(kind: IndexKind, index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(VectorError::IndexOutOfRange { kind, index, bound })
    }
}
