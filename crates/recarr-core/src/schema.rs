//! Field definitions and the [`RecordSchema`] of a structured array.

use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::dtype::{DType, ElementType};
use crate::error::ArrayError;

/// Extents of an array or of a field's per-record sub-array.
///
/// Uses `SmallVec<[usize; 4]>` to avoid heap allocation for the common
/// case of up to four dimensions.
pub type Shape = SmallVec<[usize; 4]>;

/// Definition of one named field of a record type.
///
/// A field with an empty `sub_shape` holds one element per record; a field
/// with `sub_shape = [3]` holds a 3-vector per record.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    /// Name, unique within one schema.
    pub name: String,
    /// Element type or nested record type.
    pub dtype: DType,
    /// Extra fixed dimensions per record.
    pub sub_shape: Shape,
}

impl FieldDef {
    /// Create a field from its parts.
    pub fn new(name: impl Into<String>, dtype: impl Into<DType>, sub_shape: &[usize]) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
            sub_shape: Shape::from_slice(sub_shape),
        }
    }

    /// A field holding one element per record.
    pub fn scalar(name: impl Into<String>, element: ElementType) -> Self {
        Self::new(name, element, &[])
    }

    /// A field holding an `n`-vector per record.
    pub fn vector(name: impl Into<String>, element: ElementType, n: usize) -> Self {
        Self::new(name, element, &[n])
    }

    /// A field holding one nested record per record.
    pub fn nested(name: impl Into<String>, schema: RecordSchema) -> Self {
        Self::new(name, DType::Record(schema), &[])
    }

    /// Number of elements this field holds per record.
    pub fn elements_per_record(&self) -> usize {
        self.sub_shape.iter().product()
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', {}", self.name, self.dtype)?;
        if !self.sub_shape.is_empty() {
            write!(f, ", {:?}", self.sub_shape.as_slice())?;
        }
        write!(f, ")")
    }
}

/// Ordered, name-unique list of fields describing one record.
///
/// Validated once on construction and then shared by every operation that
/// derives a new record type (adding fields, fusing, selecting). Uses
/// `IndexMap` for declaration-order iteration with O(1) name lookup.
#[derive(Clone, Debug, Default)]
pub struct RecordSchema {
    fields: IndexMap<String, FieldDef>,
}

impl RecordSchema {
    /// A schema with no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a schema, rejecting duplicate field names.
    pub fn new(fields: impl IntoIterator<Item = FieldDef>) -> Result<Self, ArrayError> {
        let mut schema = Self::empty();
        for field in fields {
            schema.push(field)?;
        }
        Ok(schema)
    }

    /// Append one field, rejecting a name already present.
    pub fn push(&mut self, field: FieldDef) -> Result<(), ArrayError> {
        if self.fields.contains_key(&field.name) {
            return Err(ArrayError::DuplicateField { name: field.name });
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Look up a field by position.
    pub fn get_index(&self, index: usize) -> Option<&FieldDef> {
        self.fields.get_index(index).map(|(_, def)| def)
    }

    /// Position of a field in declaration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Fields of `self` followed by fields of `other`.
    pub fn concat(&self, other: &RecordSchema) -> Result<Self, ArrayError> {
        let mut out = self.clone();
        for field in other.iter() {
            out.push(field.clone())?;
        }
        Ok(out)
    }

    /// Schema restricted to `names`, in the order given.
    pub fn select(&self, names: &[&str]) -> Result<Self, ArrayError> {
        let mut out = Self::empty();
        for &name in names {
            let field = self.get(name).ok_or_else(|| ArrayError::FieldNotFound {
                name: name.to_string(),
            })?;
            out.push(field.clone())?;
        }
        Ok(out)
    }
}

// `IndexMap` equality ignores order; two schemas are only equal when their
// fields match position by position.
impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl fmt::Display for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, field) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        write!(f, "]")
    }
}

impl<'a> IntoIterator for &'a RecordSchema {
    type Item = &'a FieldDef;
    type IntoIter = indexmap::map::Values<'a, String, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}
