//! colbatch - columnar batches for row-oriented query execution
//!
//! A [`ColumnBatch`] is a fixed set of typed [`ColumnVector`]s plus a published
//! row count. Producers populate vectors and publish the batch once; consumers
//! then read cells by `(row_id, col_id)` through typed getters, checking
//! [`ColumnBatch::is_null_at`] first on nullable columns.
//!
//! Variable-length data is stored flattened: byte strings share one buffer,
//! and array/map cells are `(offset, length)` spans over a child vector. Reads
//! hand out zero-copy views ([`Bytes`], [`ArrayView`], [`MapView`],
//! [`RowView`]) and never allocate, except when a caller asks for a copy.
//!
//! Values and null markers live in `arrow` buffers: fixed-width values in
//! `ScalarBuffer`s, byte strings in one `Buffer`, and nulls as a validity
//! bitmap that is only materialized once a row is marked null.
//!
//! ```
//! use colbatch::{ColumnBatch, ElementAccess};
//! use colbatch::vector::{ArrayVector, IntVector};
//!
//! let mut tags = ArrayVector::with_child(2, IntVector::from_values(vec![1, 2, 3, 4]).into());
//! tags.set_span(0, 0, 3)?;
//! tags.set_span(1, 3, 1)?;
//!
//! let mut batch = ColumnBatch::new(vec![
//!     IntVector::from_options(&[Some(10), None]).into(),
//!     tags.into(),
//! ]);
//! batch.set_num_rows(2)?;
//!
//! assert!(batch.is_null_at(1, 0)?);
//! assert_eq!(batch.get_int(0, 0)?, 10);
//! assert_eq!(batch.get_array(0, 1)?.get_int(2)?, 3);
//! # Ok::<(), colbatch::VectorError>(())
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod types;
pub mod vector;

pub use batch::{BatchState, ColumnBatch, DEFAULT_SIZE};
pub use config::BatchConfig;
pub use error::{IndexKind, Result, VectorError};
pub use types::{Capability, DecimalData, TimestampData};
pub use vector::{ArrayView, Bytes, ColumnVector, ElementAccess, MapView, RowView};
