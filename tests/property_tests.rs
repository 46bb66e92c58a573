//! Property-based tests for array addressing and batch round trips.

use proptest::prelude::*;

use colbatch::vector::{ArrayVector, BytesVector, IntVector, LongVector};
use colbatch::{ColumnBatch, ElementAccess};

/// Strategy for a list of optional int arrays (outer `None` = null row).
fn nested_rows() -> impl Strategy<Value = Vec<Option<Vec<Option<i32>>>>> {
    proptest::collection::vec(
        proptest::option::of(proptest::collection::vec(
            proptest::option::of(any::<i32>()),
            0..6,
        )),
        1..40,
    )
}

/// Flattens nested rows into a child vector plus an array vector over it.
fn build_array_column(rows: &[Option<Vec<Option<i32>>>]) -> ArrayVector {
    let flat: Vec<Option<i32>> = rows.iter().flatten().flatten().copied().collect();
    let mut arrays = ArrayVector::with_child(rows.len(), IntVector::from_options(&flat).into());
    let mut offset = 0i64;
    for (row_id, row) in rows.iter().enumerate() {
        match row {
            Some(elements) => {
                let len = elements.len() as i64;
                arrays.set_span(row_id, offset, len).expect("span within child");
                offset += len;
            }
            None => arrays.set_null(row_id).expect("row in range"),
        }
    }
    arrays.set_size(rows.len());
    arrays
}

/// Strategy for a list of optional string arrays (outer `None` = null row).
fn nested_string_rows() -> impl Strategy<Value = Vec<Option<Vec<Option<String>>>>> {
    proptest::collection::vec(
        proptest::option::of(proptest::collection::vec(
            proptest::option::of("[a-zé ]{0,8}"),
            0..5,
        )),
        1..30,
    )
}

/// Flattens nested string rows into a bytes child plus an array vector over it.
fn build_string_array_column(rows: &[Option<Vec<Option<String>>>]) -> ArrayVector {
    let flat: Vec<Option<String>> = rows.iter().flatten().flatten().cloned().collect();
    let mut arrays = ArrayVector::with_child(rows.len(), BytesVector::from_options(&flat).into());
    let mut offset = 0i64;
    for (row_id, row) in rows.iter().enumerate() {
        match row {
            Some(elements) => {
                let len = elements.len() as i64;
                arrays.set_span(row_id, offset, len).expect("span within child");
                offset += len;
            }
            None => arrays.set_null(row_id).expect("row in range"),
        }
    }
    arrays.set_size(rows.len());
    arrays
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: element j of getArray(i) is child[offsets[i] + j] for every getter.
    #[test]
    fn test_array_view_translates_to_child(rows in nested_rows()) {
        let arrays = build_array_column(&rows);
        arrays.validate().expect("valid spans");
        let child = arrays.child().expect("child attached");

        for (row_id, row) in rows.iter().enumerate() {
            prop_assert_eq!(arrays.is_null_at(row_id).unwrap(), row.is_none());
            let Some(elements) = row else { continue };

            let view = arrays.get_array(row_id).unwrap();
            prop_assert_eq!(view.len() as i64, arrays.lengths()[row_id]);
            let base = arrays.offsets()[row_id] as usize;
            for (j, expected) in elements.iter().enumerate() {
                prop_assert_eq!(view.is_null_at(j).unwrap(), child.is_null_at(base + j).unwrap());
                prop_assert_eq!(view.get_int(j).unwrap(), child.get_int(base + j).unwrap());
                prop_assert_eq!(view.is_null_at(j).unwrap(), expected.is_none());
                if let Some(value) = expected {
                    prop_assert_eq!(view.get_int(j).unwrap(), *value);
                }
            }
            prop_assert!(view.get_int(elements.len()).is_err());
        }
    }

    /// Property: string element j of getArray(i) reads child[offsets[i] + j].
    #[test]
    fn test_string_array_view_translates_to_child(rows in nested_string_rows()) {
        let arrays = build_string_array_column(&rows);
        arrays.validate().expect("valid spans");
        let child = arrays.child().expect("child attached");

        for (row_id, row) in rows.iter().enumerate() {
            prop_assert_eq!(arrays.is_null_at(row_id).unwrap(), row.is_none());
            let Some(elements) = row else { continue };

            let view = arrays.get_array(row_id).unwrap();
            let base = arrays.offsets()[row_id] as usize;
            for (j, expected) in elements.iter().enumerate() {
                let from_child = child.get_bytes(base + j).unwrap();
                prop_assert_eq!(view.get_bytes(j).unwrap(), from_child);
                prop_assert_eq!(view.is_null_at(j).unwrap(), child.is_null_at(base + j).unwrap());
                prop_assert_eq!(view.is_null_at(j).unwrap(), expected.is_none());
                match expected {
                    Some(text) => prop_assert_eq!(view.get_string(j).unwrap(), text.as_str()),
                    None => prop_assert!(view.get_bytes(j).unwrap().is_empty()),
                }
            }
            prop_assert!(view.get_string(elements.len()).is_err());
            prop_assert!(view.get_int(0).is_err());
        }
    }

    /// Property: values and nullness written by the producer read back unchanged.
    #[test]
    fn test_batch_round_trip(
        longs in proptest::collection::vec(proptest::option::of(any::<i64>()), 1..100),
        text in proptest::collection::vec(proptest::option::of("[a-z0-9 ]{0,12}"), 1..100),
    ) {
        let num_rows = longs.len().min(text.len());
        let mut batch = ColumnBatch::new(vec![
            LongVector::from_options(&longs).into(),
            BytesVector::from_options(&text).into(),
        ]);
        batch.set_num_rows(num_rows).unwrap();

        for row_id in 0..num_rows {
            prop_assert_eq!(batch.is_null_at(row_id, 0).unwrap(), longs[row_id].is_none());
            if let Some(v) = longs[row_id] {
                prop_assert_eq!(batch.get_long(row_id, 0).unwrap(), v);
            }
            prop_assert_eq!(batch.is_null_at(row_id, 1).unwrap(), text[row_id].is_none());
            if let Some(s) = &text[row_id] {
                prop_assert_eq!(batch.get_string(row_id, 1).unwrap(), s.as_str());
            }
        }
        prop_assert!(batch.is_null_at(num_rows, 0).is_err());
    }

    /// Property: reads are idempotent regardless of order.
    #[test]
    fn test_reads_are_idempotent(
        values in proptest::collection::vec(any::<i32>(), 1..64),
        order in proptest::collection::vec(any::<prop::sample::Index>(), 1..128),
    ) {
        let mut batch = ColumnBatch::new(vec![IntVector::from_values(values.clone()).into()]);
        batch.set_num_rows(values.len()).unwrap();

        for index in order {
            let row_id = index.index(values.len());
            prop_assert_eq!(batch.get_int(row_id, 0).unwrap(), values[row_id]);
            prop_assert_eq!(batch.get_int(row_id, 0).unwrap(), values[row_id]);
        }
    }
}
