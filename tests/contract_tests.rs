//! Contract tests for the column batch read path.

use std::borrow::Cow;
use std::sync::Arc;

use arrow::buffer::Buffer;
use colbatch::vector::{
    ArrayVector, BooleanVector, ByteVector, BytesVector, DecimalVector, DoubleVector, FloatVector,
    IntVector, LongVector, MapVector, RowVector, ShortVector, TimestampVector,
};
use colbatch::{
    BatchConfig, Capability, ColumnBatch, ColumnVector, ElementAccess, IndexKind, TimestampData,
    VectorError, DEFAULT_SIZE,
};

fn publish(columns: Vec<ColumnVector>, num_rows: usize) -> ColumnBatch {
    let mut batch = ColumnBatch::new(columns);
    batch.set_num_rows(num_rows).expect("publish batch");
    batch
}

/// Builds an array-of-int column: row 0 = [1, 2, 3], row 1 = [4].
fn int_array_column() -> ColumnVector {
    let child = IntVector::from_values(vec![1, 2, 3, 4]);
    let mut arrays = ArrayVector::with_child(2, child.into());
    arrays.set_span(0, 0, 3).expect("span row 0");
    arrays.set_span(1, 3, 1).expect("span row 1");
    arrays.set_size(2);
    arrays.into()
}

// =============================================================================
// Scenario Contracts
// =============================================================================

mod scenario_contracts {
    use super::*;

    #[test]
    fn test_int_column_with_null() {
        let batch = publish(
            vec![IntVector::from_options(&[Some(10), None, Some(30)]).into()],
            3,
        );

        assert!(batch.is_null_at(1, 0).unwrap());
        assert!(!batch.is_null_at(0, 0).unwrap());
        assert_eq!(batch.get_int(0, 0).unwrap(), 10);
        assert_eq!(batch.get_int(2, 0).unwrap(), 30);
    }

    #[test]
    fn test_array_of_int_column() {
        let batch = publish(vec![int_array_column()], 2);

        let first = batch.get_array(0, 0).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first.to_int_array().unwrap(), vec![1, 2, 3]);

        let second = batch.get_array(1, 0).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second.get_int(0).unwrap(), 4);
    }

    #[test]
    fn test_string_with_tight_backing_buffer() {
        let batch = publish(vec![BytesVector::from_values(&["hudi"]).into()], 1);

        let view = batch.get_byte_array(0, 0).unwrap();
        assert!(view.spans_backing());
        assert!(matches!(batch.get_string(0, 0).unwrap(), Cow::Borrowed("hudi")));
        assert!(matches!(batch.get_binary(0, 0).unwrap(), Cow::Borrowed(b"hudi")));
    }

    #[test]
    fn test_string_with_larger_backing_buffer() {
        let data = Buffer::from_vec(b"__hudi__".to_vec());
        let vector = BytesVector::from_parts(data, &[2], &[4]).unwrap();
        let batch = publish(vec![vector.into()], 1);

        let view = batch.get_byte_array(0, 0).unwrap();
        assert!(!view.spans_backing());
        assert_eq!(view.data().len(), 8);
        assert_eq!(view.offset(), 2);
        assert_eq!(batch.get_string(0, 0).unwrap(), "hudi");
        assert_eq!(&*batch.get_binary(0, 0).unwrap(), b"hudi");
    }

    #[test]
    fn test_get_int_on_array_column_is_mismatch() {
        let batch = publish(vec![int_array_column()], 2);

        let err = batch.get_int(0, 0).unwrap_err();
        assert_eq!(
            err,
            VectorError::CapabilityMismatch {
                requested: Capability::Int,
                actual: Capability::Array,
            }
        );
        assert!(err.is_contract_violation());
    }
}

// =============================================================================
// Boundary Contracts
// =============================================================================

mod boundary_contracts {
    use super::*;

    #[test]
    fn test_last_row_and_one_past() {
        let batch = publish(vec![LongVector::from_values(vec![1, 2, 3]).into()], 3);

        assert_eq!(batch.get_long(2, 0).unwrap(), 3);
        assert_eq!(
            batch.get_long(3, 0).unwrap_err(),
            VectorError::IndexOutOfRange {
                kind: IndexKind::Row,
                index: 3,
                bound: 3,
            }
        );
        assert!(batch.is_null_at(3, 0).is_err());
    }

    #[test]
    fn test_rows_past_num_rows_are_unreadable_even_within_capacity() {
        let batch = publish(vec![IntVector::new(DEFAULT_SIZE).into()], 10);
        assert!(batch.get_int(9, 0).is_ok());
        assert!(batch.get_int(10, 0).is_err());
    }

    #[test]
    fn test_column_out_of_range() {
        let batch = publish(vec![IntVector::new(1).into()], 1);
        assert_eq!(
            batch.get_int(0, 1).unwrap_err(),
            VectorError::IndexOutOfRange {
                kind: IndexKind::Column,
                index: 1,
                bound: 1,
            }
        );
    }

    #[test]
    fn test_zero_length_array_is_empty_and_non_null() {
        let mut arrays = ArrayVector::with_child(1, IntVector::new(0).into());
        arrays.set_span(0, 0, 0).unwrap();
        let batch = publish(vec![arrays.into()], 1);

        assert!(!batch.is_null_at(0, 0).unwrap());
        let view = batch.get_array(0, 0).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.to_int_array().unwrap(), Vec::<i32>::new());
        assert!(view.get_int(0).is_err());
    }

    #[test]
    fn test_null_array_row_checked_first() {
        let mut arrays = ArrayVector::with_child(2, IntVector::from_values(vec![7]).into());
        arrays.set_span(0, 0, 1).unwrap();
        arrays.set_null(1).unwrap();
        let batch = publish(vec![arrays.into()], 2);

        assert!(batch.is_null_at(1, 0).unwrap());
        // Span of a null row is producer-defined; the default is empty.
        assert!(batch.get_array(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_unpublished_batch_has_no_rows() {
        let batch = ColumnBatch::new(vec![IntVector::from_values(vec![1]).into()]);
        assert_eq!(batch.num_rows(), 0);
        assert!(batch.get_int(0, 0).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let batch = publish(Vec::new(), 0);
        assert_eq!(batch.arity(), 0);
        assert_eq!(batch.capacity(), None);
        assert!(batch.row(0).is_err());
    }
}

// =============================================================================
// Round Trip Contracts
// =============================================================================

mod round_trip_contracts {
    use super::*;

    #[test]
    fn test_every_capability_round_trips() {
        let ts = TimestampData::from_epoch_millis(1_700_000_000_123, 456_789);

        let mut ids = RowVector::new(
            2,
            vec![
                IntVector::from_values(vec![1, 2]).into(),
                BytesVector::from_values(&["x", "y"]).into(),
            ],
        )
        .unwrap();
        ids.set_null(1).unwrap();

        let mut props = MapVector::new(
            2,
            BytesVector::from_values(&["k1", "k2", "k3"]).into(),
            LongVector::from_values(vec![10, 20, 30]).into(),
        )
        .unwrap();
        props.set_span(0, 0, 2).unwrap();
        props.set_span(1, 2, 1).unwrap();

        let columns: Vec<ColumnVector> = vec![
            BooleanVector::from_options(&[Some(true), None]).into(),
            ByteVector::from_values(vec![-1, 1]).into(),
            ShortVector::from_values(vec![300, -300]).into(),
            IntVector::from_options(&[None, Some(7)]).into(),
            LongVector::from_values(vec![i64::MIN, i64::MAX]).into(),
            FloatVector::from_values(vec![1.5, -0.25]).into(),
            DoubleVector::from_values(vec![f64::MAX, 2.0]).into(),
            BytesVector::from_options(&[Some("héllo"), None]).into(),
            DecimalVector::from_unscaled(&[Some(-12_345), Some(1)]).into(),
            TimestampVector::from_options(&[Some(ts), None]).into(),
            int_array_column(),
            props.into(),
            ids.into(),
        ];
        let batch = publish(columns, 2);
        assert_eq!(batch.arity(), 13);

        assert!(batch.get_boolean(0, 0).unwrap());
        assert!(batch.is_null_at(1, 0).unwrap());
        assert_eq!(batch.get_byte(0, 1).unwrap(), -1);
        assert_eq!(batch.get_short(1, 2).unwrap(), -300);
        assert!(batch.is_null_at(0, 3).unwrap());
        assert_eq!(batch.get_int(1, 3).unwrap(), 7);
        assert_eq!(batch.get_long(0, 4).unwrap(), i64::MIN);
        assert_eq!(batch.get_float(1, 5).unwrap(), -0.25);
        assert_eq!(batch.get_double(0, 6).unwrap(), f64::MAX);
        assert_eq!(batch.get_string(0, 7).unwrap(), "héllo");
        assert!(batch.is_null_at(1, 7).unwrap());
        assert_eq!(batch.get_decimal(0, 8, 7, 3).unwrap().to_string(), "-12.345");
        assert_eq!(batch.get_timestamp(0, 9, 9).unwrap(), ts);
        assert_eq!(batch.get_timestamp(0, 9, 3).unwrap(), ts);
        assert!(batch.is_null_at(1, 9).unwrap());
        assert_eq!(batch.get_array(1, 10).unwrap().to_int_array().unwrap(), vec![4]);

        let map = batch.get_map(0, 11).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_array().get_string(1).unwrap(), "k2");
        assert_eq!(map.value_array().get_long(1).unwrap(), 20);

        let row = batch.get_row(0, 12).unwrap();
        assert_eq!(row.get_int(0).unwrap(), 1);
        assert_eq!(row.get_string(1).unwrap(), "x");
        assert!(batch.is_null_at(1, 12).unwrap());
    }

    #[test]
    fn test_timestamp_reads_back_at_any_precision() {
        let ts = TimestampData::from_epoch_millis(1_999, 123_456);
        let batch = publish(vec![TimestampVector::from_options(&[Some(ts)]).into()], 1);

        for precision in [0, 3, 6, 9] {
            assert_eq!(batch.get_timestamp(0, 0, precision).unwrap(), ts);
        }
        assert_eq!(
            batch.get_timestamp(0, 0, 3).unwrap().truncate_to(3),
            TimestampData::from_epoch_millis(1_999, 0)
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let batch = publish(
            vec![BytesVector::from_values(&[&[b'o', 0xC3, b'k'][..]]).into()],
            1,
        );
        let text = batch.get_string(0, 0).unwrap();
        assert_eq!(text, "o\u{FFFD}k");
        assert!(matches!(text, Cow::Owned(_)));
    }

    #[test]
    fn test_batch_row_view_spans_columns() {
        let batch = publish(
            vec![
                IntVector::from_values(vec![5, 6]).into(),
                DoubleVector::from_options(&[None, Some(0.5)]).into(),
            ],
            2,
        );
        let row = batch.row(0).unwrap();
        assert_eq!(row.num_elements(), 2);
        assert_eq!(row.get_int(0).unwrap(), 5);
        assert!(row.is_null_at(1).unwrap());
        assert!(row.get_int(2).is_err());
    }
}

// =============================================================================
// Lifecycle And Concurrency Contracts
// =============================================================================

mod lifecycle_contracts {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_publish_exactly_once() {
        let mut batch = ColumnBatch::new(vec![IntVector::new(4).into()]);
        batch.set_num_rows(4).unwrap();
        assert_eq!(batch.set_num_rows(2), Err(VectorError::AlreadyPublished));
        assert_eq!(batch.num_rows(), 4);
    }

    #[test]
    fn test_producer_fills_batches_per_config() {
        let config = BatchConfig::new().with_batch_size(3);
        let source: Vec<i64> = (0..7).collect();
        let mut batches = Vec::new();
        let mut start = 0;
        while start < source.len() {
            let rows = (source.len() - start).min(config.batch_size);
            let mut batch = ColumnBatch::new(vec![LongVector::new(config.batch_size).into()]);
            if let ColumnVector::Long(v) = batch.column_mut(0).unwrap() {
                v.update_values(|values| {
                    values[..rows].copy_from_slice(&source[start..start + rows]);
                });
            }
            batch.set_num_rows(rows).unwrap();
            batches.push(batch);
            start += rows;
        }

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].num_rows(), 1);
        assert_eq!(batches[2].get_long(0, 0).unwrap(), 6);
    }

    #[test]
    fn test_concurrent_reads_are_idempotent() {
        let n = 1000;
        let values: Vec<Option<i32>> = (0..n)
            .map(|i| if i % 7 == 0 { None } else { Some(i) })
            .collect();
        let strings: Vec<String> = (0..n).map(|i| format!("row-{i}")).collect();
        let batch = Arc::new(publish(
            vec![
                IntVector::from_options(&values).into(),
                BytesVector::from_values(&strings).into(),
            ],
            n as usize,
        ));

        let first: Vec<Option<(i32, String)>> = (0..n as usize)
            .into_par_iter()
            .map(|row| {
                if batch.is_null_at(row, 0).unwrap() {
                    None
                } else {
                    Some((
                        batch.get_int(row, 0).unwrap(),
                        batch.get_string(row, 1).unwrap().into_owned(),
                    ))
                }
            })
            .collect();

        let mut second: Vec<Option<(i32, String)>> = (0..n as usize)
            .rev()
            .map(|row| {
                if batch.is_null_at(row, 0).unwrap() {
                    None
                } else {
                    Some((
                        batch.get_int(row, 0).unwrap(),
                        batch.get_string(row, 1).unwrap().into_owned(),
                    ))
                }
            })
            .collect();
        second.reverse();

        assert_eq!(first, second);
        assert_eq!(first[0], None);
        assert_eq!(first[8], Some((8, "row-8".to_string())));
    }
}
