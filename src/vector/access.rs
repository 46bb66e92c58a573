//! Positional typed access shared by nested views.

use std::borrow::Cow;

use crate::error::Result;
use crate::types::{DecimalData, TimestampData};

use super::array::ArrayView;
use super::bytes::Bytes;
use super::map::MapView;
use super::row::RowView;
use super::ColumnVector;

/// Typed, null-aware reads by position over vectors borrowed for `'a`.
///
/// Implementors only translate a position into a `(vector, row)` pair;
/// every getter is derived from that translation, so a position reads
/// exactly what the underlying vector holds at the translated row.
pub trait ElementAccess<'a> {
    /// Number of addressable positions.
    fn num_elements(&self) -> usize;

    /// Translates `pos` into the backing vector and its row index.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `pos >= num_elements()`.
    fn locate(&self, pos: usize) -> Result<(&'a ColumnVector, usize)>;

    /// Returns whether the element at `pos` is null.
    fn is_null_at(&self, pos: usize) -> Result<bool> {
        let (vector, row_id) = self.locate(pos)?;
        vector.is_null_at(row_id)
    }

    fn get_boolean(&self, pos: usize) -> Result<bool> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_boolean(row_id)
    }

    fn get_byte(&self, pos: usize) -> Result<i8> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_byte(row_id)
    }

    fn get_short(&self, pos: usize) -> Result<i16> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_short(row_id)
    }

    fn get_int(&self, pos: usize) -> Result<i32> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_int(row_id)
    }

    fn get_long(&self, pos: usize) -> Result<i64> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_long(row_id)
    }

    fn get_float(&self, pos: usize) -> Result<f32> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_float(row_id)
    }

    fn get_double(&self, pos: usize) -> Result<f64> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_double(row_id)
    }

    fn get_bytes(&self, pos: usize) -> Result<Bytes<'a>> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_bytes(row_id)
    }

    /// Decodes the element at `pos` as UTF-8, replacing malformed sequences.
    fn get_string(&self, pos: usize) -> Result<Cow<'a, str>> {
        Ok(self.get_bytes(pos)?.to_str_lossy())
    }

    fn get_decimal(&self, pos: usize, precision: u8, scale: u8) -> Result<DecimalData> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_decimal(row_id, precision, scale)
    }

    fn get_timestamp(&self, pos: usize, precision: u8) -> Result<TimestampData> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_timestamp(row_id, precision)
    }

    fn get_array(&self, pos: usize) -> Result<ArrayView<'a>> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_array(row_id)
    }

    fn get_map(&self, pos: usize) -> Result<MapView<'a>> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_map(row_id)
    }

    fn get_row(&self, pos: usize) -> Result<RowView<'a>> {
        let (vector, row_id) = self.locate(pos)?;
        vector.get_row(row_id)
    }
}
