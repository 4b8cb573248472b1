//! Decomposing record types and record arrays.

use recarr_core::{Array, DType, RecordSchema};

/// Split one level of a record type into parallel lists of names, types
/// and leading sub-shape extents (0 for scalar fields).
///
/// Nested record types are returned as they are.
pub fn flatten_dtypes(schema: &RecordSchema) -> (Vec<String>, Vec<DType>, Vec<usize>) {
    let mut names = Vec::with_capacity(schema.len());
    let mut dtypes = Vec::with_capacity(schema.len());
    let mut sub_shapes = Vec::with_capacity(schema.len());
    for field in schema {
        names.push(field.name.clone());
        dtypes.push(field.dtype.clone());
        sub_shapes.push(field.sub_shape.first().copied().unwrap_or(0));
    }
    (names, dtypes, sub_shapes)
}

/// Leaf columns of an array, depth first in field declaration order.
///
/// A plain array is its own single leaf.
pub fn unnest(array: &Array) -> Vec<Array> {
    unnest_ref(array).into_iter().cloned().collect()
}

/// Borrowing [`unnest`].
pub fn unnest_ref(array: &Array) -> Vec<&Array> {
    let mut leaves = Vec::new();
    collect_leaves(array, &mut leaves);
    leaves
}

fn collect_leaves<'a>(array: &'a Array, out: &mut Vec<&'a Array>) {
    match array.as_record() {
        Some(record) => {
            for column in record.columns() {
                collect_leaves(column, out);
            }
        }
        None => out.push(array),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recarr_core::{ElementType, FieldDef, RecordArray};
    use recarr_test_utils::ab_records;

    #[test]
    fn flatten_one_level() {
        let inner = RecordSchema::new([FieldDef::scalar("x", ElementType::Int32)]).unwrap();
        let schema = RecordSchema::new([
            FieldDef::scalar("id", ElementType::Int64),
            FieldDef::vector("xyz", ElementType::Float64, 3),
            FieldDef::nested("inner", inner.clone()),
        ])
        .unwrap();
        let (names, dtypes, sub_shapes) = flatten_dtypes(&schema);
        assert_eq!(names, ["id", "xyz", "inner"]);
        assert_eq!(dtypes[1], DType::Scalar(ElementType::Float64));
        assert_eq!(dtypes[2], DType::Record(inner));
        assert_eq!(sub_shapes, [0, 3, 0]);
    }

    #[test]
    fn unnest_flat_record() {
        let leaves = unnest(&ab_records());
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0], Array::from(vec![1i64, 2, 3, 4]));
        assert_eq!(leaves[1], Array::from(vec![5.0, 6.0, 7.0, 8.0]));
    }

    #[test]
    fn unnest_plain_is_identity() {
        let plain = Array::from(vec![1i64, 2]);
        assert_eq!(unnest(&plain), vec![plain.clone()]);
    }

    #[test]
    fn unnest_recurses_into_nested_fields() {
        let inner = ab_records().into_record().unwrap();
        let outer_schema = RecordSchema::new([
            FieldDef::nested("pair", inner.schema().clone()),
            FieldDef::scalar("flag", ElementType::Bool),
        ])
        .unwrap();
        let outer = RecordArray::from_columns(
            &[4],
            outer_schema,
            vec![Array::Record(inner), Array::from(vec![true, false, true, false])],
        )
        .unwrap();
        let outer = Array::Record(outer);
        let leaves = unnest_ref(&outer);
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[2].element_type(), Some(ElementType::Bool));
    }
}
