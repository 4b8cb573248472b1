//! Structured arrays: one column per named field.
//!
//! A [`RecordArray`] of shape `S` and schema `F` stores, for every field
//! `f` of `F`, a column of shape `S ++ f.sub_shape` holding `f.dtype`.
//! The invariant is checked on construction; afterwards columns are only
//! reachable through [`FieldMut`], which cannot change a column's type or
//! shape.

use ndarray::{ArrayViewMutD, Dimension, IxDyn};

use crate::array::{check_index, type_mismatch, Array, Element};
use crate::dtype::DType;
use crate::error::ArrayError;
use crate::schema::{FieldDef, RecordSchema, Shape};
use crate::value::{Record, Value};

/// An n-dimensional array of records.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordArray {
    shape: Shape,
    schema: RecordSchema,
    columns: Vec<Array>,
}

impl RecordArray {
    /// Default-filled records of the given shape.
    pub fn zeros(shape: &[usize], schema: RecordSchema) -> Self {
        let columns = schema
            .iter()
            .map(|field| Array::zeros(&field.dtype, &column_shape(shape, field)))
            .collect();
        Self {
            shape: Shape::from_slice(shape),
            schema,
            columns,
        }
    }

    /// Assemble a record array from one column per field.
    ///
    /// Every column must hold its field's type and have the shape
    /// `shape ++ sub_shape`.
    pub fn from_columns(
        shape: &[usize],
        schema: RecordSchema,
        columns: Vec<Array>,
    ) -> Result<Self, ArrayError> {
        if columns.len() != schema.len() {
            return Err(ArrayError::LengthMismatch {
                expected: schema.len(),
                found: columns.len(),
            });
        }
        for (field, column) in schema.iter().zip(&columns) {
            let dtype = column.dtype();
            if dtype != field.dtype {
                return Err(type_mismatch(&field.dtype, &dtype));
            }
            let expected = column_shape(shape, field);
            if column.shape() != expected.as_slice() {
                return Err(ArrayError::ShapeMismatch {
                    field: field.name.clone(),
                    expected: expected.to_vec(),
                    found: column.shape().to_vec(),
                });
            }
        }
        Ok(Self {
            shape: Shape::from_slice(shape),
            schema,
            columns,
        })
    }

    /// Copy converted to `schema`, matching fields by position.
    pub fn cast(&self, schema: &RecordSchema) -> Result<Self, ArrayError> {
        if schema.len() != self.schema.len() {
            return Err(ArrayError::LengthMismatch {
                expected: schema.len(),
                found: self.schema.len(),
            });
        }
        let columns = schema
            .iter()
            .zip(self.schema.iter().zip(&self.columns))
            .map(|(target, (source, column))| {
                if target.sub_shape != source.sub_shape {
                    return Err(ArrayError::ShapeMismatch {
                        field: target.name.clone(),
                        expected: target.sub_shape.to_vec(),
                        found: source.sub_shape.to_vec(),
                    });
                }
                column.cast(&target.dtype)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            shape: self.shape.clone(),
            schema: schema.clone(),
            columns,
        })
    }

    /// Extents of the record dimensions.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of record dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent of the leading record axis.
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Whether the leading record axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// The record type.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Column of a field by name.
    pub fn field(&self, name: &str) -> Option<&Array> {
        self.schema.index_of(name).map(|i| &self.columns[i])
    }

    /// Column of a field by position.
    pub fn column(&self, index: usize) -> Option<&Array> {
        self.columns.get(index)
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> &[Array] {
        &self.columns
    }

    /// `(definition, column)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDef, &Array)> {
        self.schema.iter().zip(&self.columns)
    }

    /// Split into shape, schema and columns.
    pub fn into_parts(self) -> (Shape, RecordSchema, Vec<Array>) {
        (self.shape, self.schema, self.columns)
    }

    /// Value at `index`: a [`Value::Record`] on a full index, the
    /// sub-array as [`Value::Array`] on a shorter one.
    pub fn get(&self, index: &[usize]) -> Option<Value> {
        if index.len() == self.ndim() {
            self.record(index).map(Value::Record)
        } else if index.len() < self.ndim() && check_index(&self.shape, index).is_ok() {
            Some(Value::Array(Array::Record(self.subarray_unchecked(index))))
        } else {
            None
        }
    }

    /// The record at a full index.
    ///
    /// Sub-shaped fields come back as [`Value::Array`], nested record
    /// fields as [`Value::Record`].
    pub fn record(&self, index: &[usize]) -> Option<Record> {
        if index.len() != self.ndim() || check_index(&self.shape, index).is_err() {
            return None;
        }
        self.fields()
            .map(|(field, column)| column.get(index).map(|value| (field.name.as_str(), value)))
            .collect()
    }

    /// Every record in row-major order.
    pub fn records(&self) -> Vec<Record> {
        positions(&self.shape)
            .filter_map(|ix| self.record(ix.slice()))
            .collect()
    }

    /// Store `value` at `index`.
    ///
    /// A [`Value::Record`] is matched by field name and must name every
    /// field; a [`Value::List`] at a full index is matched by position.
    /// At a shorter index a list fills the next axis item by item, a
    /// record is broadcast over the sub-array, and a record array is
    /// copied in.
    ///
    /// Every field is converted before anything is written; on error the
    /// record array is unchanged.
    pub fn set(&mut self, index: &[usize], value: &Value) -> Result<(), ArrayError> {
        let block = self.stage(index, value)?;
        self.assign(index, &block)
    }

    /// The records [`RecordArray::set`] would write at `index`, converted
    /// to this schema. Nothing is written.
    pub fn stage(&self, index: &[usize], value: &Value) -> Result<RecordArray, ArrayError> {
        check_index(&self.shape, index)?;
        let mut block = Self::zeros(&self.shape[index.len()..], self.schema.clone());
        block.fill(&[], value)?;
        Ok(block)
    }

    pub(crate) fn fill(&mut self, index: &[usize], value: &Value) -> Result<(), ArrayError> {
        check_index(&self.shape, index)?;
        match value {
            Value::Record(record) => {
                let values = self
                    .schema
                    .names()
                    .map(|name| {
                        record.get(name).ok_or_else(|| ArrayError::FieldNotFound {
                            name: name.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                for (column, value) in self.columns.iter_mut().zip(values) {
                    column.fill(index, value)?;
                }
                Ok(())
            }
            Value::List(items) if index.len() == self.ndim() => {
                if items.len() != self.schema.len() {
                    return Err(ArrayError::LengthMismatch {
                        expected: self.schema.len(),
                        found: items.len(),
                    });
                }
                for (column, item) in self.columns.iter_mut().zip(items) {
                    column.fill(index, item)?;
                }
                Ok(())
            }
            Value::List(items) => {
                let n = self.shape[index.len()];
                if items.len() != n {
                    return Err(ArrayError::LengthMismatch {
                        expected: n,
                        found: items.len(),
                    });
                }
                let mut ix = index.to_vec();
                ix.push(0);
                for (i, item) in items.iter().enumerate() {
                    ix[index.len()] = i;
                    self.fill(&ix, item)?;
                }
                Ok(())
            }
            Value::Array(Array::Record(src)) => self.assign(index, src),
            other => Err(ArrayError::TypeMismatch {
                expected: self.schema.to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    /// Copy `src` into the sub-array at `prefix`, field by field by position.
    ///
    /// `src` is cast to this schema first, so a failed cast writes nothing.
    pub fn assign(&mut self, prefix: &[usize], src: &RecordArray) -> Result<(), ArrayError> {
        check_index(&self.shape, prefix)?;
        let expected = &self.shape[prefix.len()..];
        if src.shape() != expected {
            return Err(ArrayError::ShapeMismatch {
                field: "value".to_string(),
                expected: expected.to_vec(),
                found: src.shape().to_vec(),
            });
        }
        let casted;
        let src = if src.schema == self.schema {
            src
        } else {
            casted = src.cast(&self.schema)?;
            &casted
        };
        for (column, source) in self.columns.iter_mut().zip(&src.columns) {
            column.assign(prefix, source)?;
        }
        Ok(())
    }

    pub(crate) fn subarray_unchecked(&self, prefix: &[usize]) -> RecordArray {
        Self {
            shape: Shape::from_slice(&self.shape[prefix.len()..]),
            schema: self.schema.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| column.subarray_unchecked(prefix))
                .collect(),
        }
    }

    /// Owned copy of the records at `index` along record axis `axis`.
    pub fn index_axis(&self, axis: usize, index: usize) -> Result<RecordArray, ArrayError> {
        if axis >= self.ndim() || index >= self.shape[axis] {
            return Err(ArrayError::IndexOutOfBounds {
                index: vec![index],
                shape: self.shape.to_vec(),
            });
        }
        let mut shape = self.shape.clone();
        shape.remove(axis);
        let columns = self
            .columns
            .iter()
            .map(|column| column.index_axis(axis, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            shape,
            schema: self.schema.clone(),
            columns,
        })
    }

    /// Mutable access to one field's column.
    pub fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let i = self.schema.index_of(name)?;
        Some(FieldMut {
            column: &mut self.columns[i],
        })
    }

    /// Simultaneous mutable access to several distinct fields.
    ///
    /// Returns the schema of the selection, in the order given, together
    /// with one handle per name.
    pub fn fields_mut(
        &mut self,
        names: &[&str],
    ) -> Result<(RecordSchema, Vec<FieldMut<'_>>), ArrayError> {
        let schema = self.schema.select(names)?;
        let mut slots: Vec<Option<&mut Array>> = self.columns.iter_mut().map(Some).collect();
        let mut handles = Vec::with_capacity(names.len());
        for &name in names {
            let column = self
                .schema
                .index_of(name)
                .and_then(|i| slots[i].take())
                .ok_or_else(|| ArrayError::DuplicateField {
                    name: name.to_string(),
                })?;
            handles.push(FieldMut { column });
        }
        Ok((schema, handles))
    }

    /// Overwrite a whole field, casting `src` to the field's type.
    pub fn set_field(&mut self, name: &str, src: &Array) -> Result<(), ArrayError> {
        let mut field = self
            .field_mut(name)
            .ok_or_else(|| ArrayError::FieldNotFound {
                name: name.to_string(),
            })?;
        field.assign(&[], src)
    }
}

/// Mutable handle on one column of a [`RecordArray`].
///
/// Writes go into the record array's own storage; the column's type and
/// shape stay fixed.
#[derive(Debug)]
pub struct FieldMut<'a> {
    column: &'a mut Array,
}

impl FieldMut<'_> {
    /// Read-only view of the column.
    pub fn as_array(&self) -> &Array {
        self.column
    }

    /// Shape of the column.
    pub fn shape(&self) -> &[usize] {
        self.column.shape()
    }

    /// Type of the column.
    pub fn dtype(&self) -> DType {
        self.column.dtype()
    }

    /// Value at `index`.
    pub fn get(&self, index: &[usize]) -> Option<Value> {
        self.column.get(index)
    }

    /// Typed mutable view, if the column holds `T`.
    pub fn view_mut<T: Element>(&mut self) -> Option<ArrayViewMutD<'_, T>> {
        self.column.typed_mut::<T>().map(|data| data.view_mut())
    }

    /// Store `value` at `index`.
    pub fn set(&mut self, index: &[usize], value: &Value) -> Result<(), ArrayError> {
        self.column.set(index, value)
    }

    /// Copy `src` into the sub-array at `prefix`.
    pub fn assign(&mut self, prefix: &[usize], src: &Array) -> Result<(), ArrayError> {
        self.column.assign(prefix, src)
    }
}

/// Every index of `shape` in row-major order.
pub fn positions(shape: &[usize]) -> impl Iterator<Item = IxDyn> {
    ndarray::indices(IxDyn(shape)).into_iter()
}

fn column_shape(shape: &[usize], field: &FieldDef) -> Shape {
    let mut out = Shape::from_slice(shape);
    out.extend_from_slice(&field.sub_shape);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::ElementType;

    fn points() -> RecordArray {
        let schema = RecordSchema::new([
            FieldDef::vector("coords", ElementType::Float64, 3),
            FieldDef::scalar("id", ElementType::Int64),
        ])
        .unwrap();
        RecordArray::from_columns(
            &[2],
            schema,
            vec![
                Array::from_rows(vec![[0.0, 0.5, 1.0], [1.0, 1.5, 2.0]]),
                Array::from(vec![7i64, 9]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_columns_checks_shapes() {
        let schema = RecordSchema::new([FieldDef::vector("xy", ElementType::Float64, 2)]).unwrap();
        let err = RecordArray::from_columns(
            &[2],
            schema,
            vec![Array::from_rows(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ArrayError::ShapeMismatch {
                field: "xy".into(),
                expected: vec![2, 2],
                found: vec![2, 3],
            }
        );
    }

    #[test]
    fn from_columns_checks_types() {
        let schema = RecordSchema::new([FieldDef::scalar("a", ElementType::Int32)]).unwrap();
        let err = RecordArray::from_columns(&[1], schema, vec![Array::from(vec![1.0])]);
        assert!(matches!(err, Err(ArrayError::TypeMismatch { .. })));
    }

    #[test]
    fn record_access() {
        let rec = points();
        let first = rec.record(&[0]).unwrap();
        assert_eq!(first["id"], Value::Int(7));
        assert_eq!(first["coords"], Value::Array(Array::from(vec![0.0, 0.5, 1.0])));
        assert!(rec.record(&[2]).is_none());
        assert_eq!(rec.records().len(), 2);
    }

    #[test]
    fn set_record_by_name() {
        let mut rec = points();
        let value = Record::new()
            .with("id", 1i64)
            .with("coords", vec![3.0, 2.0, 1.0]);
        rec.set(&[1], &Value::Record(value)).unwrap();
        assert_eq!(rec.field("id").unwrap().get(&[1]), Some(Value::Int(1)));
        assert_eq!(
            rec.field("coords").unwrap().get(&[1, 0]),
            Some(Value::Float(3.0))
        );
    }

    #[test]
    fn set_record_missing_field_fails_without_writing() {
        let mut rec = points();
        let before = rec.clone();
        let err = rec
            .set(&[0], &Value::Record(Record::new().with("id", 5i64)))
            .unwrap_err();
        assert_eq!(err, ArrayError::FieldNotFound { name: "coords".into() });
        assert_eq!(rec, before);
    }

    #[test]
    fn set_failing_later_field_writes_nothing() {
        let mut rec = points();
        let before = rec.clone();
        let value = Record::new()
            .with("coords", vec![4.0, 4.0, 4.0])
            .with("id", "seven");
        let err = rec.set(&[0], &Value::Record(value)).unwrap_err();
        assert!(matches!(err, ArrayError::TypeMismatch { .. }));
        assert_eq!(rec, before);

        let rows = Value::List(vec![
            Value::Record(Record::new().with("coords", vec![1.0, 1.0, 1.0]).with("id", 1i64)),
            Value::Record(Record::new().with("coords", vec![2.0, 2.0, 2.0]).with("id", "two")),
        ]);
        assert!(rec.set(&[], &rows).is_err());
        assert_eq!(rec, before);
    }

    #[test]
    fn assign_failing_cast_writes_nothing() {
        let mut rec = points();
        let before = rec.clone();
        let schema = RecordSchema::new([
            FieldDef::vector("coords", ElementType::Float64, 3),
            FieldDef::scalar("id", ElementType::Str),
        ])
        .unwrap();
        let src = RecordArray::from_columns(
            &[2],
            schema,
            vec![
                Array::from_rows(vec![[9.0; 3], [9.0; 3]]),
                Array::from(vec!["1", "x"]),
            ],
        )
        .unwrap();
        assert!(rec.assign(&[], &src).is_err());
        assert_eq!(rec, before);
    }

    #[test]
    fn set_positional_list() {
        let mut rec = points();
        let value = Value::List(vec![Value::from(vec![1.0, 1.0, 1.0]), Value::Int(3)]);
        rec.set(&[0], &value).unwrap();
        assert_eq!(rec.field("id").unwrap().get(&[0]), Some(Value::Int(3)));
        let err = rec.set(&[0], &Value::List(vec![Value::Int(1)])).unwrap_err();
        assert!(matches!(err, ArrayError::LengthMismatch { .. }));
    }

    #[test]
    fn field_mut_writes_through() {
        let mut rec = points();
        {
            let mut ids = rec.field_mut("id").unwrap();
            let mut view = ids.view_mut::<i64>().unwrap();
            view[[1usize].as_slice()] = 42;
        }
        assert_eq!(rec.field("id").unwrap().get(&[1]), Some(Value::Int(42)));
    }

    #[test]
    fn fields_mut_rejects_repeated_names() {
        let mut rec = points();
        assert!(matches!(
            rec.fields_mut(&["id", "id"]),
            Err(ArrayError::DuplicateField { .. })
        ));
        let (schema, handles) = rec.fields_mut(&["id", "coords"]).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), ["id", "coords"]);
        assert_eq!(handles[1].shape(), &[2, 3]);
    }

    #[test]
    fn set_field_casts() {
        let mut rec = points();
        rec.set_field("id", &Array::from(vec![1.9, 2.1])).unwrap();
        assert_eq!(rec.field("id").unwrap(), &Array::from(vec![1i64, 2]));
    }

    #[test]
    fn cast_by_position() {
        let rec = points();
        let target = RecordSchema::new([
            FieldDef::vector("p", ElementType::Float32, 3),
            FieldDef::scalar("n", ElementType::Str),
        ])
        .unwrap();
        let cast = rec.cast(&target).unwrap();
        assert_eq!(cast.field("n").unwrap().get(&[0]), Some(Value::from("7")));
    }

    #[test]
    fn partial_get_is_subarray() {
        let schema = RecordSchema::new([FieldDef::scalar("v", ElementType::Int32)]).unwrap();
        let rec = RecordArray::zeros(&[2, 3], schema);
        let row = rec.get(&[1]).unwrap();
        let row = row.as_array().and_then(Array::as_record).unwrap();
        assert_eq!(row.shape(), &[3]);
    }
}
