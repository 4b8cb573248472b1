//! Building record arrays from columns and combining them.

use indexmap::IndexMap;
use log::trace;
use recarr_core::{Array, ArrayError, ElementType, FieldDef, RecordArray, RecordSchema, Value};

/// Build a record array from named columns.
///
/// The leading `record_dims` dimensions of every column form the shared
/// record shape; the remaining dimensions become the field's sub-shape.
/// Fields appear in the iteration order of `fields_map`. A field named in
/// `fixed_types` takes that type and sub-shape instead, and its column is
/// cast into it.
///
/// # Errors
///
/// - [`ArrayError::InvalidDims`] if `record_dims` is zero.
/// - [`ArrayError::EmptyInput`] if `fields_map` is empty.
/// - [`ArrayError::ColumnNotFound`] if `fixed_types` names an absent column.
/// - [`ArrayError::TooFewDims`] if a column has fewer than `record_dims` dimensions.
/// - [`ArrayError::ShapeMismatch`] if record shapes differ between columns,
///   or a fixed sub-shape disagrees with its column.
/// - [`ArrayError::TypeMismatch`] if a column cannot be cast to its fixed type.
pub fn recarray(
    fields_map: &IndexMap<String, Array>,
    fixed_types: &[FieldDef],
    record_dims: usize,
) -> Result<RecordArray, ArrayError> {
    if record_dims == 0 {
        return Err(ArrayError::InvalidDims { dims: record_dims });
    }
    for fixed in fixed_types {
        if !fields_map.contains_key(&fixed.name) {
            return Err(ArrayError::ColumnNotFound {
                name: fixed.name.clone(),
            });
        }
    }
    let Some(first) = fields_map.values().next() else {
        return Err(ArrayError::EmptyInput {
            operation: "recarray",
        });
    };
    let record_shape = first.shape().get(..record_dims).unwrap_or_default();

    let mut fields = Vec::with_capacity(fields_map.len());
    let mut columns = Vec::with_capacity(fields_map.len());
    for (name, column) in fields_map {
        if column.ndim() < record_dims {
            return Err(ArrayError::TooFewDims {
                field: name.clone(),
                ndim: column.ndim(),
                required: record_dims,
            });
        }
        let (leading, trailing) = column.shape().split_at(record_dims);
        if leading != record_shape {
            return Err(ArrayError::ShapeMismatch {
                field: name.clone(),
                expected: record_shape.to_vec(),
                found: leading.to_vec(),
            });
        }
        match fixed_types.iter().find(|fixed| fixed.name == *name) {
            Some(fixed) => {
                if fixed.sub_shape.as_slice() != trailing {
                    return Err(ArrayError::ShapeMismatch {
                        field: name.clone(),
                        expected: fixed.sub_shape.to_vec(),
                        found: trailing.to_vec(),
                    });
                }
                columns.push(column.cast(&fixed.dtype)?);
                fields.push(fixed.clone());
            }
            None => {
                columns.push(column.clone());
                fields.push(FieldDef::new(name.as_str(), column.dtype(), trailing));
            }
        }
    }

    let schema = RecordSchema::new(fields)?;
    trace!("recarray: {} fields, record shape {:?}", schema.len(), record_shape);
    RecordArray::from_columns(record_shape, schema, columns)
}

/// [`recarray`] over a mapping value, wrapping every column as an array.
///
/// # Errors
///
/// [`ArrayError::NotKeyed`] if `fields` is not a mapping, otherwise as
/// [`recarray`].
pub fn recarray_from_value(
    fields: &Value,
    fixed_types: &[FieldDef],
    record_dims: usize,
) -> Result<RecordArray, ArrayError> {
    let Value::Map(map) = fields else {
        return Err(ArrayError::NotKeyed {
            what: fields.kind().to_string(),
        });
    };
    let columns = map
        .iter()
        .map(|(name, column)| Ok((name.clone(), Array::from_value(column)?)))
        .collect::<Result<IndexMap<_, _>, ArrayError>>()?;
    recarray(&columns, fixed_types, record_dims)
}

/// Append fields to a record array.
///
/// The result keeps the base fields and data, followed by `new_fields`.
/// New field `i` is filled from `data[i]` when given (cast to the declared
/// type; its shape must be the record shape followed by the field's
/// sub-shape), and default-initialized otherwise.
///
/// # Errors
///
/// - [`ArrayError::NotStructured`] if `base` is a plain array.
/// - [`ArrayError::LengthMismatch`] if `data` and `new_fields` differ in length.
/// - [`ArrayError::DuplicateField`] if a new name is already taken.
/// - [`ArrayError::ShapeMismatch`] / [`ArrayError::TypeMismatch`] if a data
///   column does not fit its field.
pub fn add_fields(
    base: &Array,
    new_fields: &[FieldDef],
    data: Option<&[Option<Array>]>,
) -> Result<RecordArray, ArrayError> {
    let base = base.as_record().ok_or_else(|| ArrayError::NotStructured {
        argument: "base".to_string(),
    })?;
    if let Some(data) = data {
        if data.len() != new_fields.len() {
            return Err(ArrayError::LengthMismatch {
                expected: new_fields.len(),
                found: data.len(),
            });
        }
    }
    let added = RecordSchema::new(new_fields.iter().cloned())?;
    let schema = base.schema().concat(&added)?;

    let mut columns = base.columns().to_vec();
    for (i, field) in added.iter().enumerate() {
        let mut shape = base.shape().to_vec();
        shape.extend_from_slice(&field.sub_shape);
        let mut column = Array::zeros(&field.dtype, &shape);
        if let Some(src) = data.and_then(|data| data[i].as_ref()) {
            if src.shape() != shape.as_slice() {
                return Err(ArrayError::ShapeMismatch {
                    field: field.name.clone(),
                    expected: shape,
                    found: src.shape().to_vec(),
                });
            }
            column.assign(&[], src)?;
        }
        columns.push(column);
    }
    RecordArray::from_columns(base.shape(), schema, columns)
}

/// Join record arrays of one shape field-wise.
///
/// The result has the fields of every input in argument order, with their
/// data copied unchanged.
///
/// # Errors
///
/// - [`ArrayError::EmptyInput`] if `arrays` is empty.
/// - [`ArrayError::NotStructured`] if an input is a plain array.
/// - [`ArrayError::ShapeMismatch`] if two inputs differ in shape.
/// - [`ArrayError::DuplicateField`] if a field name occurs in two inputs.
pub fn fuse(arrays: &[&Array]) -> Result<RecordArray, ArrayError> {
    let records = arrays
        .iter()
        .enumerate()
        .map(|(i, array)| {
            array.as_record().ok_or_else(|| ArrayError::NotStructured {
                argument: format!("arrays[{i}]"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let Some(first) = records.first() else {
        return Err(ArrayError::EmptyInput { operation: "fuse" });
    };

    let mut schema = RecordSchema::empty();
    let mut columns = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if record.shape() != first.shape() {
            return Err(ArrayError::ShapeMismatch {
                field: format!("arrays[{i}]"),
                expected: first.shape().to_vec(),
                found: record.shape().to_vec(),
            });
        }
        schema = schema.concat(record.schema())?;
        columns.extend_from_slice(record.columns());
    }
    RecordArray::from_columns(first.shape(), schema, columns)
}

/// Concatenate plain arrays along the leading axis.
///
/// Element types are promoted to a common type first; trailing shapes
/// must agree.
///
/// # Errors
///
/// - [`ArrayError::EmptyInput`] if `arrays` is empty.
/// - [`ArrayError::NotPlain`] if an input is a record array.
/// - [`ArrayError::ShapeMismatch`] if trailing shapes differ or an input
///   is zero-dimensional.
pub fn concatenate(arrays: &[&Array]) -> Result<Array, ArrayError> {
    let mut element: Option<ElementType> = None;
    for (i, array) in arrays.iter().enumerate() {
        let t = array.element_type().ok_or_else(|| ArrayError::NotPlain {
            argument: format!("arrays[{i}]"),
        })?;
        element = Some(element.map_or(t, |acc| acc.promote(t)));
    }
    let element = element.ok_or(ArrayError::EmptyInput {
        operation: "concatenate",
    })?;
    let parts = arrays
        .iter()
        .map(|array| array.cast(&element.into()))
        .collect::<Result<Vec<_>, _>>()?;
    Array::concatenate(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recarr_core::DType;
    use recarr_test_utils::{ab_records, columns, single_column};

    #[test]
    fn recarray_from_single_column() {
        let rec = recarray(&single_column("a", vec![0i64, 1, 2, 3]), &[], 1).unwrap();
        assert_eq!(rec.shape(), &[4]);
        assert_eq!(rec.names().collect::<Vec<_>>(), ["a"]);
        assert_eq!(rec.field("a").unwrap(), &Array::from(vec![0i64, 1, 2, 3]));
    }

    #[test]
    fn recarray_sub_shape_from_trailing_dims() {
        let map = columns([
            ("coords", Array::from_rows(vec![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]])),
            ("id", Array::from(vec![1i64, 2])),
        ]);
        let rec = recarray(&map, &[], 1).unwrap();
        let coords = rec.schema().get("coords").unwrap();
        assert_eq!(coords.sub_shape.as_slice(), &[3]);
        assert_eq!(coords.dtype, DType::Scalar(ElementType::Float64));
    }

    #[test]
    fn recarray_two_record_dims() {
        let map = columns([(
            "v",
            Array::from_shape_vec(&[2, 2, 3], (0..12i64).collect()).unwrap(),
        )]);
        let rec = recarray(&map, &[], 2).unwrap();
        assert_eq!(rec.shape(), &[2, 2]);
        assert_eq!(rec.schema().get("v").unwrap().sub_shape.as_slice(), &[3]);
    }

    #[test]
    fn recarray_fixed_type_casts() {
        let map = single_column("a", vec![1i64, 2]);
        let fixed = [FieldDef::scalar("a", ElementType::Float32)];
        let rec = recarray(&map, &fixed, 1).unwrap();
        assert_eq!(rec.field("a").unwrap(), &Array::from(vec![1.0f32, 2.0]));
    }

    #[test]
    fn recarray_rejects_unknown_fixed_column() {
        let map = single_column("a", vec![1i64]);
        let fixed = [FieldDef::scalar("z", ElementType::Int32)];
        assert_eq!(
            recarray(&map, &fixed, 1),
            Err(ArrayError::ColumnNotFound { name: "z".into() })
        );
    }

    #[test]
    fn recarray_rejects_record_shape_mismatch() {
        let map = columns([
            ("a", Array::from(vec![1i64, 2, 3])),
            ("b", Array::from(vec![1i64, 2])),
        ]);
        assert_eq!(
            recarray(&map, &[], 1),
            Err(ArrayError::ShapeMismatch {
                field: "b".into(),
                expected: vec![3],
                found: vec![2],
            })
        );
    }

    #[test]
    fn recarray_rejects_bad_dims() {
        let map = single_column("a", vec![1i64]);
        assert_eq!(
            recarray(&map, &[], 0),
            Err(ArrayError::InvalidDims { dims: 0 })
        );
        assert!(matches!(
            recarray(&map, &[], 2),
            Err(ArrayError::TooFewDims { required: 2, .. })
        ));
        assert!(matches!(
            recarray(&IndexMap::new(), &[], 1),
            Err(ArrayError::EmptyInput { .. })
        ));
    }

    #[test]
    fn recarray_does_not_modify_input() {
        let map = single_column("a", vec![1i64, 2]);
        let before = map.clone();
        let fixed = [FieldDef::scalar("a", ElementType::Float64)];
        recarray(&map, &fixed, 1).unwrap();
        assert_eq!(map, before);
    }

    #[test]
    fn recarray_from_mapping_value() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Value::from(vec![1i64, 2]));
        map.insert("b".to_string(), Value::from(vec!["x", "y"]));
        let rec = recarray_from_value(&Value::Map(map), &[], 1).unwrap();
        assert_eq!(rec.field("b").unwrap().get(&[1]), Some(Value::from("y")));
        assert!(matches!(
            recarray_from_value(&Value::from(vec![1i64]), &[], 1),
            Err(ArrayError::NotKeyed { .. })
        ));
    }

    #[test]
    fn add_fields_appends_defaults() {
        let base = Array::from(recarray(&single_column("a", vec![0i64, 1, 2, 3]), &[], 1).unwrap());
        let rec = add_fields(
            &base,
            &[
                FieldDef::vector("b", ElementType::Float64, 2),
                FieldDef::scalar("c", ElementType::Int64),
            ],
            None,
        )
        .unwrap();
        assert_eq!(rec.names().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(rec.schema().get("b").unwrap().sub_shape.as_slice(), &[2]);
        assert_eq!(rec.field("a").unwrap(), &Array::from(vec![0i64, 1, 2, 3]));
        assert_eq!(rec.field("b").unwrap().shape(), &[4, 2]);
        assert_eq!(rec.field("c").unwrap(), &Array::from(vec![0i64; 4]));
    }

    #[test]
    fn add_fields_with_data() {
        let base = ab_records();
        let rec = add_fields(
            &base,
            &[
                FieldDef::scalar("c", ElementType::Float64),
                FieldDef::scalar("d", ElementType::Str),
            ],
            Some(&[Some(Array::from(vec![1i64, 2, 3, 4])), None]),
        )
        .unwrap();
        assert_eq!(rec.field("c").unwrap(), &Array::from(vec![1.0, 2.0, 3.0, 4.0]));
        assert_eq!(rec.field("d").unwrap().get(&[0]), Some(Value::from("")));
    }

    #[test]
    fn add_fields_errors() {
        let base = ab_records();
        assert!(matches!(
            add_fields(&Array::from(vec![1i64]), &[], None),
            Err(ArrayError::NotStructured { .. })
        ));
        assert_eq!(
            add_fields(&base, &[FieldDef::scalar("a", ElementType::Int32)], None),
            Err(ArrayError::DuplicateField { name: "a".into() })
        );
        assert!(matches!(
            add_fields(&base, &[FieldDef::scalar("c", ElementType::Int32)], Some(&[])),
            Err(ArrayError::LengthMismatch { expected: 1, found: 0 })
        ));
        assert!(matches!(
            add_fields(
                &base,
                &[FieldDef::scalar("c", ElementType::Int32)],
                Some(&[Some(Array::from(vec![1i64]))]),
            ),
            Err(ArrayError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn fuse_concatenates_fields() {
        let a = Array::from(recarray(&single_column("a", vec![0i64, 1, 2, 3]), &[], 1).unwrap());
        let b = Array::from(recarray(&single_column("b", vec![4i64, 5, 6, 7]), &[], 1).unwrap());
        let fused = fuse(&[&a, &b]).unwrap();
        assert_eq!(fused.shape(), &[4]);
        assert_eq!(fused.names().collect::<Vec<_>>(), ["a", "b"]);
        for i in 0..4 {
            let record = fused.record(&[i]).unwrap();
            assert_eq!(record["a"], a.as_record().unwrap().field("a").unwrap().get(&[i]).unwrap());
            assert_eq!(record["b"], Value::Int(4 + i as i64));
        }
    }

    #[test]
    fn fuse_errors() {
        let a = Array::from(recarray(&single_column("a", vec![0i64, 1, 2, 3]), &[], 1).unwrap());
        let short = Array::from(recarray(&single_column("b", vec![0i64, 1]), &[], 1).unwrap());
        assert!(matches!(
            fuse(&[&a, &short]),
            Err(ArrayError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            fuse(&[&a, &Array::from(vec![1i64])]),
            Err(ArrayError::NotStructured { .. })
        ));
        assert_eq!(
            fuse(&[&a, &a]),
            Err(ArrayError::DuplicateField { name: "a".into() })
        );
        assert!(matches!(fuse(&[]), Err(ArrayError::EmptyInput { .. })));
    }

    #[test]
    fn concatenate_promotes() {
        let a = Array::from_rows(vec![[1i64, 2]]);
        let b = Array::from_rows(vec![[0.5, 1.5], [2.5, 3.5]]);
        let out = concatenate(&[&a, &b]).unwrap();
        assert_eq!(out.shape(), &[3, 2]);
        assert_eq!(out.element_type(), Some(ElementType::Float64));
        assert_eq!(out.get(&[0, 1]), Some(Value::Float(2.0)));
    }

    #[test]
    fn concatenate_errors() {
        let a = Array::from_rows(vec![[1i64, 2]]);
        let b = Array::from_rows(vec![[1i64, 2, 3]]);
        assert!(matches!(
            concatenate(&[&a, &b]),
            Err(ArrayError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            concatenate(&[&a, &ab_records()]),
            Err(ArrayError::NotPlain { .. })
        ));
        assert!(matches!(concatenate(&[]), Err(ArrayError::EmptyInput { .. })));
    }
}
