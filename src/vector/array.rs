//! Array vectors: per-row (offset, length) spans over a flattened child vector.

use tracing::debug;

use crate::error::{check_index, check_range, IndexKind, Result, VectorError};
use crate::types::Capability;

use super::access::ElementAccess;
use super::nulls::NullFlags;
use super::ColumnVector;

/// Per-row `(offset, length)` pairs addressing a flattened child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spans {
    offsets: Vec<i64>,
    lengths: Vec<i64>,
}

impl Spans {
    pub(crate) fn new(capacity: usize) -> Self {
        Spans {
            offsets: vec![0; capacity],
            lengths: vec![0; capacity],
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.offsets.len()
    }

    pub(crate) fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    pub(crate) fn lengths(&self) -> &[i64] {
        &self.lengths
    }

    pub(crate) fn offsets_mut(&mut self) -> &mut [i64] {
        &mut self.offsets
    }

    pub(crate) fn lengths_mut(&mut self) -> &mut [i64] {
        &mut self.lengths
    }

    /// Resolves row `row_id` into a `(start, len)` child range.
    pub(crate) fn resolve(&self, row_id: usize, child_capacity: usize) -> Result<(usize, usize)> {
        check_index(IndexKind::Row, row_id, self.offsets.len())?;
        checked_span(
            row_id,
            self.offsets[row_id],
            self.lengths[row_id],
            child_capacity,
        )
    }

    /// Stores a span already known to fit.
    pub(crate) fn put(&mut self, row_id: usize, offset: i64, length: i64) {
        self.offsets[row_id] = offset;
        self.lengths[row_id] = length;
    }

    pub(crate) fn set(
        &mut self,
        row_id: usize,
        offset: i64,
        length: i64,
        child_capacity: usize,
    ) -> Result<()> {
        check_index(IndexKind::Row, row_id, self.offsets.len())?;
        checked_span(row_id, offset, length, child_capacity)?;
        self.offsets[row_id] = offset;
        self.lengths[row_id] = length;
        Ok(())
    }
}

/// Converts an in-memory length to a stored span value, saturating at `i64::MAX`.
pub(crate) fn span_value(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn checked_span(
    row: usize,
    offset: i64,
    length: i64,
    child_capacity: usize,
) -> Result<(usize, usize)> {
    let invalid = || VectorError::InvalidSpan {
        row,
        offset,
        length,
        child_capacity,
    };
    let start = usize::try_from(offset).map_err(|_| invalid())?;
    let len = usize::try_from(length).map_err(|_| invalid())?;
    match start.checked_add(len) {
        Some(end) if end <= child_capacity => Ok((start, len)),
        _ => Err(invalid()),
    }
}

/// A null-aware "array of T" vector.
///
/// Every row's elements live in one shared child vector; row `i` covers
/// child rows `[offsets[i], offsets[i] + lengths[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayVector {
    spans: Spans,
    child: Option<Box<ColumnVector>>,
    size: usize,
    nulls: NullFlags,
}

impl ArrayVector {
    /// Creates an array vector of `capacity` rows with no child attached.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        ArrayVector {
            spans: Spans::new(capacity),
            child: None,
            size: 0,
            nulls: NullFlags::new(capacity),
        }
    }

    /// Creates an array vector of `capacity` rows over `child`.
    #[must_use]
    pub fn with_child(capacity: usize, child: ColumnVector) -> Self {
        let mut vector = ArrayVector::new(capacity);
        vector.child = Some(Box::new(child));
        vector
    }

    /// Attaches (or replaces) the flattened child vector.
    pub fn set_child(&mut self, child: ColumnVector) {
        debug!(
            capacity = self.capacity(),
            child_capability = %child.capability(),
            child_capacity = child.capacity(),
            "attached array child vector"
        );
        self.child = Some(Box::new(child));
    }

    /// Returns the child vector, if attached.
    #[must_use]
    pub fn child(&self) -> Option<&ColumnVector> {
        self.child.as_deref()
    }

    /// Returns the child vector mutably, if attached.
    pub fn child_mut(&mut self) -> Option<&mut ColumnVector> {
        self.child.as_deref_mut()
    }

    /// Returns the fixed capacity (the length of the null-flag sequence).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nulls.capacity()
    }

    /// Returns how many leading rows the producer has populated.
    ///
    /// Reads do not consult this; the owning batch's row count bounds them.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Records how many leading rows have been populated.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Returns the null flags.
    #[must_use]
    pub fn nulls(&self) -> &NullFlags {
        &self.nulls
    }

    /// Returns the per-row start offsets into the child.
    #[must_use]
    pub fn offsets(&self) -> &[i64] {
        self.spans.offsets()
    }

    /// Returns the per-row element counts.
    #[must_use]
    pub fn lengths(&self) -> &[i64] {
        self.spans.lengths()
    }

    /// Returns the raw offsets for bulk population. See [`ArrayVector::validate`].
    pub fn offsets_mut(&mut self) -> &mut [i64] {
        self.spans.offsets_mut()
    }

    /// Returns the raw lengths for bulk population. See [`ArrayVector::validate`].
    pub fn lengths_mut(&mut self) -> &mut [i64] {
        self.spans.lengths_mut()
    }

    /// Returns whether `row_id` is null.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn is_null_at(&self, row_id: usize) -> Result<bool> {
        self.nulls.is_null(row_id)
    }

    /// Points row `row_id` at child rows `[offset, offset + length)`.
    ///
    /// # Errors
    ///
    /// Returns `MissingChild` if no child is attached, `IndexOutOfRange` if
    /// `row_id >= capacity`, or `InvalidSpan` if the span exceeds the child.
    pub fn set_span(&mut self, row_id: usize, offset: i64, length: i64) -> Result<()> {
        let child_capacity = self.child_capacity()?;
        self.spans.set(row_id, offset, length, child_capacity)?;
        self.nulls.set_not_null(row_id)
    }

    /// Marks `row_id` as null. Its span is left as is.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`.
    pub fn set_null(&mut self, row_id: usize) -> Result<()> {
        self.nulls.set_null(row_id)
    }

    /// Checks every non-null row among the first `size()` rows against the child.
    ///
    /// # Errors
    ///
    /// Returns `MissingChild` or the first `InvalidSpan` found.
    pub fn validate(&self) -> Result<()> {
        let child_capacity = self.child_capacity()?;
        for row_id in 0..self.size.min(self.capacity()) {
            if !self.nulls.is_null(row_id)? {
                self.spans.resolve(row_id, child_capacity)?;
            }
        }
        Ok(())
    }

    /// Returns a zero-copy view over row `row_id`'s elements.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `row_id >= capacity`, `MissingChild` if no
    /// child is attached, or `InvalidSpan` if the stored span exceeds the child.
    pub fn get_array(&self, row_id: usize) -> Result<ArrayView<'_>> {
        check_index(IndexKind::Row, row_id, self.capacity())?;
        let child = self.child.as_deref().ok_or(VectorError::MissingChild)?;
        let (offset, len) = self.spans.resolve(row_id, child.capacity())?;
        Ok(ArrayView { child, offset, len })
    }

    fn child_capacity(&self) -> Result<usize> {
        self.child
            .as_deref()
            .map(ColumnVector::capacity)
            .ok_or(VectorError::MissingChild)
    }
}

/// A lazy, zero-copy view of one array cell.
///
/// Local index `j` reads child row `offset + j`. Views hold no data of their
/// own and can be read in any order, any number of times.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a> {
    child: &'a ColumnVector,
    offset: usize,
    len: usize,
}

macro_rules! bulk_copy {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&self) -> Result<Vec<$ty>> {
            match self.child {
                ColumnVector::$variant(v) => v.copy_range(self.offset, self.len),
                other => Err(other.mismatch(Capability::$variant)),
            }
        }
    };
}

impl<'a> ArrayView<'a> {
    /// Creates a view over `child[offset..offset + len]`.
    ///
    /// # Errors
    ///
    /// Returns `ViewOutOfBounds` if the range exceeds the child's capacity.
    pub fn new(child: &'a ColumnVector, offset: usize, len: usize) -> Result<Self> {
        check_range(offset, len, child.capacity())?;
        Ok(ArrayView { child, offset, len })
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first child row covered by this view.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the flattened child vector.
    #[must_use]
    pub fn child(&self) -> &'a ColumnVector {
        self.child
    }

    /// Returns the element type of the array.
    #[must_use]
    pub fn element_capability(&self) -> Capability {
        self.child.capability()
    }

    /// Returns the number of null elements.
    #[must_use]
    pub fn null_count(&self) -> usize {
        (0..self.len)
            .filter(|&j| self.child.is_null_at(self.offset + j).unwrap_or(false))
            .count()
    }

    bulk_copy!(
        /// Copies a boolean array's raw elements.
        to_boolean_array, Boolean, bool
    );
    bulk_copy!(
        /// Copies a byte array's raw elements.
        to_byte_array, Byte, i8
    );
    bulk_copy!(
        /// Copies a short array's raw elements.
        to_short_array, Short, i16
    );
    bulk_copy!(
        /// Copies an int array's raw elements. Null elements copy their raw slot.
        to_int_array, Int, i32
    );
    bulk_copy!(
        /// Copies a long array's raw elements.
        to_long_array, Long, i64
    );
    bulk_copy!(
        /// Copies a float array's raw elements.
        to_float_array, Float, f32
    );
    bulk_copy!(
        /// Copies a double array's raw elements.
        to_double_array, Double, f64
    );
}

impl<'a> ElementAccess<'a> for ArrayView<'a> {
    fn num_elements(&self) -> usize {
        self.len
    }

    #[inline]
    fn locate(&self, pos: usize) -> Result<(&'a ColumnVector, usize)> {
        check_index(IndexKind::Element, pos, self.len)?;
        Ok((self.child, self.offset + pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{BooleanVector, IntVector};

    fn int_arrays() -> ArrayVector {
        // row 0 = [1, 2, 3], row 1 = [4], row 2 = []
        let child = IntVector::from_values(vec![1, 2, 3, 4]);
        let mut arrays = ArrayVector::with_child(3, child.into());
        arrays.set_span(0, 0, 3).unwrap();
        arrays.set_span(1, 3, 1).unwrap();
        arrays.set_span(2, 4, 0).unwrap();
        arrays.set_size(3);
        arrays
    }

    #[test]
    fn test_get_array_views() {
        let arrays = int_arrays();
        let first = arrays.get_array(0).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first.to_int_array().unwrap(), vec![1, 2, 3]);
        assert_eq!(first.get_int(2), Ok(3));

        let second = arrays.get_array(1).unwrap();
        assert_eq!(second.get_int(0), Ok(4));
        assert!(second.get_int(1).is_err());
    }

    #[test]
    fn test_empty_array_view() {
        let arrays = int_arrays();
        let empty = arrays.get_array(2).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.to_int_array().unwrap(), Vec::<i32>::new());
        assert_eq!(arrays.is_null_at(2), Ok(false));
    }

    #[test]
    fn test_capacity_and_size() {
        let mut arrays = ArrayVector::new(8);
        assert_eq!(arrays.capacity(), 8);
        assert_eq!(arrays.size(), 0);
        arrays.set_size(5);
        assert_eq!(arrays.size(), 5);
        assert!(arrays.child().is_none());
    }

    #[test]
    fn test_missing_child() {
        let mut arrays = ArrayVector::new(2);
        assert_eq!(arrays.get_array(0).unwrap_err(), VectorError::MissingChild);
        assert_eq!(arrays.set_span(0, 0, 1).unwrap_err(), VectorError::MissingChild);
        arrays.set_child(IntVector::new(1).into());
        assert!(arrays.set_span(0, 0, 1).is_ok());
    }

    #[test]
    fn test_span_bounds() {
        let mut arrays = ArrayVector::with_child(2, IntVector::new(4).into());
        assert!(matches!(
            arrays.set_span(0, 2, 3),
            Err(VectorError::InvalidSpan { row: 0, .. })
        ));
        assert!(arrays.set_span(0, -1, 1).is_err());
        assert!(arrays.set_span(0, 0, -1).is_err());
        assert!(arrays.set_span(1, 4, 0).is_ok());
    }

    #[test]
    fn test_validate_bulk_population() {
        let mut arrays = ArrayVector::with_child(3, IntVector::new(4).into());
        arrays.offsets_mut().copy_from_slice(&[0, 2, 9]);
        arrays.lengths_mut().copy_from_slice(&[2, 2, 1]);
        arrays.set_size(2);
        assert!(arrays.validate().is_ok());

        arrays.set_size(3);
        assert!(arrays.validate().is_err());
        arrays.set_null(2).unwrap();
        assert!(arrays.validate().is_ok());
    }

    #[test]
    fn test_view_over_child_range() {
        let child: ColumnVector = IntVector::from_values(vec![5, 6, 7]).into();
        let view = ArrayView::new(&child, 1, 2).unwrap();
        assert_eq!(view.to_int_array().unwrap(), vec![6, 7]);
        assert_eq!(
            ArrayView::new(&child, 2, 2).unwrap_err(),
            VectorError::ViewOutOfBounds {
                offset: 2,
                len: 2,
                capacity: 3
            }
        );
        assert!(ArrayView::new(&child, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_boolean_bulk_copy() {
        let child = BooleanVector::from_values(vec![true, false, true]);
        let mut arrays = ArrayVector::with_child(1, child.into());
        arrays.set_span(0, 1, 2).unwrap();
        let view = arrays.get_array(0).unwrap();
        assert_eq!(view.to_boolean_array().unwrap(), vec![false, true]);
    }

    #[test]
    fn test_element_type_mismatch() {
        let arrays = int_arrays();
        let view = arrays.get_array(0).unwrap();
        assert!(matches!(
            view.get_long(0),
            Err(VectorError::CapabilityMismatch {
                requested: Capability::Long,
                actual: Capability::Int
            })
        ));
        assert!(view.to_double_array().is_err());
    }
}
