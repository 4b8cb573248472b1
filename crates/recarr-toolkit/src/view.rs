//! Borrowed views into existing arrays.
//!
//! Views never copy: they hold references into the source array and are
//! bound to its lifetime. Mutable views write straight into the source.

use ndarray::{ArrayD, ArrayView1, ArrayViewMut1, Axis, Ix1};
use recarr_core::{
    Array, ArrayError, FieldDef, FieldMut, Record, RecordArray, RecordSchema, Shape, Value,
};

/// Column views of a two-dimensional array.
///
/// # Errors
///
/// [`ArrayError::NotMatrix`] unless `array` has exactly two dimensions.
pub fn column_split<A>(array: &ArrayD<A>) -> Result<Vec<ArrayView1<'_, A>>, ArrayError> {
    let ndim = array.ndim();
    if ndim != 2 {
        return Err(ArrayError::NotMatrix { ndim });
    }
    array
        .axis_iter(Axis(1))
        .map(|column| {
            column
                .into_dimensionality::<Ix1>()
                .map_err(|_| ArrayError::NotMatrix { ndim })
        })
        .collect()
}

/// Mutable column views of a two-dimensional array.
///
/// # Errors
///
/// [`ArrayError::NotMatrix`] unless `array` has exactly two dimensions.
pub fn column_split_mut<A>(
    array: &mut ArrayD<A>,
) -> Result<Vec<ArrayViewMut1<'_, A>>, ArrayError> {
    let ndim = array.ndim();
    if ndim != 2 {
        return Err(ArrayError::NotMatrix { ndim });
    }
    array
        .axis_iter_mut(Axis(1))
        .map(|column| {
            column
                .into_dimensionality::<Ix1>()
                .map_err(|_| ArrayError::NotMatrix { ndim })
        })
        .collect()
}

/// Read-only view over selected fields of a record array.
#[derive(Clone, Debug)]
pub struct FieldsView<'a> {
    shape: &'a [usize],
    schema: RecordSchema,
    columns: Vec<&'a Array>,
}

impl<'a> FieldsView<'a> {
    /// Record shape, equal to the source's.
    pub fn shape(&self) -> &[usize] {
        self.shape
    }

    /// Record type of the view.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Field names of the view.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Column of a field, by its name in the view.
    pub fn field(&self, name: &str) -> Option<&'a Array> {
        self.schema.index_of(name).map(|i| self.columns[i])
    }

    /// The record at a full index, with the view's field names.
    pub fn record(&self, index: &[usize]) -> Option<Record> {
        if index.len() != self.shape.len() {
            return None;
        }
        self.schema
            .names()
            .zip(&self.columns)
            .map(|(name, column)| column.get(index).map(|value| (name, value)))
            .collect()
    }

    /// Copy the viewed fields into a new record array.
    pub fn to_owned(&self) -> Result<RecordArray, ArrayError> {
        RecordArray::from_columns(
            self.shape,
            self.schema.clone(),
            self.columns.iter().map(|&column| column.clone()).collect(),
        )
    }
}

/// Mutable view over selected fields of a record array.
#[derive(Debug)]
pub struct FieldsViewMut<'a> {
    shape: Shape,
    schema: RecordSchema,
    fields: Vec<FieldMut<'a>>,
}

impl<'a> FieldsViewMut<'a> {
    /// Record shape, equal to the source's.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Record type of the view.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Field names of the view.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Column of a field, by its name in the view.
    pub fn field(&self, name: &str) -> Option<&Array> {
        self.schema
            .index_of(name)
            .map(|i| self.fields[i].as_array())
    }

    /// Mutable handle on a field, by its name in the view.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldMut<'a>> {
        let i = self.schema.index_of(name)?;
        Some(&mut self.fields[i])
    }

    /// Store a record at a full index of the source.
    ///
    /// A [`Value::Record`] is matched by the view's field names and must
    /// name each of them; a [`Value::List`] is matched by position.
    /// Every field is converted before the first write, so a failed
    /// conversion leaves the source unchanged.
    pub fn set(&mut self, index: &[usize], value: &Value) -> Result<(), ArrayError> {
        if index.len() != self.shape.len() || index.iter().zip(&self.shape).any(|(i, n)| i >= n)
        {
            return Err(ArrayError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.to_vec(),
            });
        }
        let values: Vec<&Value> = match value {
            Value::Record(record) => self
                .schema
                .names()
                .map(|name| {
                    record.get(name).ok_or_else(|| ArrayError::FieldNotFound {
                        name: name.to_string(),
                    })
                })
                .collect::<Result<_, _>>()?,
            Value::List(items) if items.len() == self.fields.len() => items.iter().collect(),
            Value::List(items) => {
                return Err(ArrayError::LengthMismatch {
                    expected: self.fields.len(),
                    found: items.len(),
                })
            }
            other => {
                return Err(ArrayError::TypeMismatch {
                    expected: self.schema.to_string(),
                    found: other.kind().to_string(),
                })
            }
        };
        let blocks = self
            .fields
            .iter()
            .zip(values)
            .map(|(field, value)| field.as_array().stage(index, value))
            .collect::<Result<Vec<_>, _>>()?;
        for (field, block) in self.fields.iter_mut().zip(&blocks) {
            field.assign(index, block)?;
        }
        Ok(())
    }

    /// Copy the viewed fields into a new record array.
    pub fn to_owned(&self) -> Result<RecordArray, ArrayError> {
        RecordArray::from_columns(
            &self.shape,
            self.schema.clone(),
            self.fields
                .iter()
                .map(|field| field.as_array().clone())
                .collect(),
        )
    }
}

/// Zero-copy view over the fields `names` of a record array.
///
/// `rename`, when given, is a record type with one field per selected
/// field; the view exposes the fields under its names. Types and
/// sub-shapes must match the selected fields position by position.
///
/// # Errors
///
/// - [`ArrayError::NotStructured`] if `array` is a plain array.
/// - [`ArrayError::FieldNotFound`] / [`ArrayError::DuplicateField`] for bad names.
/// - [`ArrayError::LengthMismatch`] / [`ArrayError::TypeMismatch`] if
///   `rename` does not match the selection.
pub fn fields_view<'a>(
    array: &'a Array,
    names: &[&str],
    rename: Option<&RecordSchema>,
) -> Result<FieldsView<'a>, ArrayError> {
    let record = array.as_record().ok_or_else(|| ArrayError::NotStructured {
        argument: "array".to_string(),
    })?;
    let selected = record.schema().select(names)?;
    let columns = names
        .iter()
        .map(|&name| {
            record.field(name).ok_or_else(|| ArrayError::FieldNotFound {
                name: name.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldsView {
        shape: record.shape(),
        schema: renamed(selected, rename)?,
        columns,
    })
}

/// Mutable [`fields_view`]: writes through the view land in `array`.
///
/// # Errors
///
/// As [`fields_view`].
pub fn fields_view_mut<'a>(
    array: &'a mut Array,
    names: &[&str],
    rename: Option<&RecordSchema>,
) -> Result<FieldsViewMut<'a>, ArrayError> {
    let record = array
        .as_record_mut()
        .ok_or_else(|| ArrayError::NotStructured {
            argument: "array".to_string(),
        })?;
    let shape = Shape::from_slice(record.shape());
    let (selected, fields) = record.fields_mut(names)?;
    Ok(FieldsViewMut {
        shape,
        schema: renamed(selected, rename)?,
        fields,
    })
}

fn renamed(selected: RecordSchema, rename: Option<&RecordSchema>) -> Result<RecordSchema, ArrayError> {
    let Some(rename) = rename else {
        return Ok(selected);
    };
    if rename.len() != selected.len() {
        return Err(ArrayError::LengthMismatch {
            expected: selected.len(),
            found: rename.len(),
        });
    }
    for (target, source) in rename.iter().zip(selected.iter()) {
        if !same_layout(target, source) {
            return Err(ArrayError::TypeMismatch {
                expected: source.to_string(),
                found: target.to_string(),
            });
        }
    }
    Ok(rename.clone())
}

fn same_layout(a: &FieldDef, b: &FieldDef) -> bool {
    a.dtype == b.dtype && a.sub_shape == b.sub_shape
}
