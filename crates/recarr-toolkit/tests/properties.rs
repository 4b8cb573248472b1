//! Property tests over whole toolkit pipelines.

use ndarray::ArrayD;
use proptest::prelude::*;
use recarr_core::{Array, ArrayError, ElementType, FieldDef, Value};
use recarr_test_utils::{columns, single_column};
use recarr_toolkit::{add_fields, column_split, fuse, map_records, recarray, unnest};

fn arb_pair() -> impl Strategy<Value = (Vec<i64>, Vec<f64>)> {
    (1usize..64).prop_flat_map(|n| {
        (
            prop::collection::vec(-1000i64..1000, n),
            prop::collection::vec(-1e6f64..1e6, n),
        )
    })
}

proptest! {
    #[test]
    fn fuse_keeps_every_field((a, b) in arb_pair()) {
        let left = Array::Record(recarray(&single_column("a", a.clone()), &[], 1).unwrap());
        let right = Array::Record(recarray(&single_column("b", b.clone()), &[], 1).unwrap());
        let fused = fuse(&[&left, &right]).unwrap();

        prop_assert_eq!(fused.shape(), &[a.len()]);
        prop_assert_eq!(fused.names().collect::<Vec<_>>(), vec!["a", "b"]);
        for i in 0..a.len() {
            let record = fused.record(&[i]).unwrap();
            prop_assert_eq!(record.get("a"), Some(&Value::Int(a[i])));
            prop_assert_eq!(record.get("b"), Some(&Value::Float(b[i])));
        }
    }

    #[test]
    fn fuse_rejects_different_lengths(n in 1usize..32, extra in 1usize..8) {
        let left = Array::Record(recarray(&single_column("a", vec![0i64; n]), &[], 1).unwrap());
        let right =
            Array::Record(recarray(&single_column("b", vec![0i64; n + extra]), &[], 1).unwrap());
        let err = fuse(&[&left, &right]).unwrap_err();
        prop_assert!(matches!(err, ArrayError::ShapeMismatch { .. }), "{}", err);
    }

    #[test]
    fn unnest_returns_columns_in_order((a, b) in arb_pair()) {
        let map = columns([("a", Array::from(a.clone())), ("b", Array::from(b.clone()))]);
        let rec = Array::Record(recarray(&map, &[], 1).unwrap());
        let leaves = unnest(&rec);
        prop_assert_eq!(leaves, vec![Array::from(a), Array::from(b)]);
    }

    #[test]
    fn add_fields_appends_and_preserves((a, _) in arb_pair()) {
        let base = Array::Record(recarray(&single_column("a", a.clone()), &[], 1).unwrap());
        let grown = add_fields(
            &base,
            &[
                FieldDef::vector("b", ElementType::Float64, 2),
                FieldDef::scalar("c", ElementType::Int64),
            ],
            None,
        )
        .unwrap();

        prop_assert_eq!(grown.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        prop_assert_eq!(grown.field("a").unwrap(), &Array::from(a.clone()));
        prop_assert_eq!(grown.field("b").unwrap().shape(), &[a.len(), 2]);
        prop_assert_eq!(grown.field("c").unwrap().shape(), &[a.len()]);
    }

    #[test]
    fn map_records_sums_every_position((a, b) in arb_pair()) {
        let map = columns([("a", Array::from(a.clone())), ("b", Array::from(b.clone()))]);
        let rec = Array::Record(recarray(&map, &[], 1).unwrap());
        let sums = map_records(
            &rec,
            |value| {
                let record = value.as_record().cloned().unwrap_or_default();
                let a = record.get("a").and_then(Value::as_f64).unwrap_or(f64::NAN);
                let b = record.get("b").and_then(Value::as_f64).unwrap_or(f64::NAN);
                Value::Float(a + b)
            },
            None,
        )
        .unwrap();
        let expected: Vec<f64> = a.iter().zip(&b).map(|(&a, &b)| a as f64 + b).collect();
        prop_assert_eq!(sums, Array::from(expected));
    }

    #[test]
    fn column_split_matches_columns(rows in 1usize..16, cols in 1usize..16) {
        let data: Vec<i64> = (0..(rows * cols) as i64).collect();
        let matrix = ArrayD::from_shape_vec(vec![rows, cols], data).unwrap();
        let split = column_split(&matrix).unwrap();

        prop_assert_eq!(split.len(), cols);
        for (j, column) in split.iter().enumerate() {
            prop_assert_eq!(column.len(), rows);
            for i in 0..rows {
                prop_assert_eq!(column[i], matrix[[i, j].as_slice()]);
            }
        }
    }
}
