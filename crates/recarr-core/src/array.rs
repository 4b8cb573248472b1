//! Dynamically typed n-dimensional arrays.
//!
//! [`Array`] wraps one `ndarray::ArrayD<T>` per leaf element type, plus the
//! structured [`RecordArray`]. The [`Element`] trait links each Rust scalar
//! type to its variant so generic code can reach the typed storage.
//!
//! Element conversions go through [`Value`] and follow the casting rules of
//! the usual array libraries: `None` becomes NaN in float storage, strings
//! parse into numbers, numbers print into strings, floats truncate into
//! integers.

use std::fmt;

use ndarray::{Array2, ArrayD, ArrayViewD, ArrayViewMutD, Axis, Dimension, IxDyn};

use crate::dtype::{DType, ElementType};
use crate::error::ArrayError;
use crate::record::RecordArray;
use crate::schema::{FieldDef, RecordSchema, Shape};
use crate::traits::Indexable;
use crate::value::Value;

/// A Rust type that can be stored in a plain [`Array`].
pub trait Element: Clone + Default + PartialEq + fmt::Debug + 'static {
    /// The element type tag of this Rust type.
    const ELEMENT: ElementType;

    /// Typed storage of `array`, if it holds this element type.
    fn as_typed(array: &Array) -> Option<&ArrayD<Self>>;

    /// Mutable typed storage of `array`, if it holds this element type.
    fn as_typed_mut(array: &mut Array) -> Option<&mut ArrayD<Self>>;

    /// Wrap typed storage into an [`Array`].
    fn into_array(data: ArrayD<Self>) -> Array;

    /// Convert one element to a dynamic value.
    fn to_value(&self) -> Value;

    /// Convert a dynamic value into this element type.
    fn from_value(value: &Value) -> Result<Self, ArrayError>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident, $to:expr, $from:path) => {
        impl Element for $t {
            const ELEMENT: ElementType = ElementType::$variant;

            fn as_typed(array: &Array) -> Option<&ArrayD<Self>> {
                match array {
                    Array::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn as_typed_mut(array: &mut Array) -> Option<&mut ArrayD<Self>> {
                match array {
                    Array::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn into_array(data: ArrayD<Self>) -> Array {
                Array::$variant(data)
            }

            fn to_value(&self) -> Value {
                let convert: fn(&$t) -> Value = $to;
                convert(self)
            }

            fn from_value(value: &Value) -> Result<Self, ArrayError> {
                $from(value)
            }
        }
    };
}

impl_element!(bool, Bool, |v| Value::Bool(*v), coerce_bool);
impl_element!(i32, Int32, |v| Value::Int(i64::from(*v)), coerce_i32);
impl_element!(i64, Int64, |v| Value::Int(*v), coerce_i64);
impl_element!(f32, Float32, |v| Value::Float(f64::from(*v)), coerce_f32);
impl_element!(f64, Float64, |v| Value::Float(*v), coerce_f64);
impl_element!(String, Str, |v| Value::Str(v.clone()), coerce_string);
impl_element!(Value, Object, |v| v.clone(), coerce_object);

fn mismatch(expected: ElementType, value: &Value) -> ArrayError {
    ArrayError::TypeMismatch {
        expected: format!("{expected:?}"),
        found: value.kind().to_string(),
    }
}

fn coerce_bool(value: &Value) -> Result<bool, ArrayError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        Value::Float(f) => Ok(*f != 0.0),
        other => Err(mismatch(ElementType::Bool, other)),
    }
}

fn coerce_i64(value: &Value) -> Result<i64, ArrayError> {
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Int(i) => Ok(*i),
        Value::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        Value::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| mismatch(ElementType::Int64, value)),
        other => Err(mismatch(ElementType::Int64, other)),
    }
}

fn coerce_i32(value: &Value) -> Result<i32, ArrayError> {
    let wide = coerce_i64(value).map_err(|_| mismatch(ElementType::Int32, value))?;
    i32::try_from(wide).map_err(|_| mismatch(ElementType::Int32, value))
}

fn coerce_f64(value: &Value) -> Result<f64, ArrayError> {
    match value {
        Value::Null => Ok(f64::NAN),
        Value::Bool(b) => Ok(f64::from(u8::from(*b))),
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        Value::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| mismatch(ElementType::Float64, value)),
        other => Err(mismatch(ElementType::Float64, other)),
    }
}

fn coerce_f32(value: &Value) -> Result<f32, ArrayError> {
    coerce_f64(value)
        .map(|f| f as f32)
        .map_err(|_| mismatch(ElementType::Float32, value))
}

fn coerce_string(value: &Value) -> Result<String, ArrayError> {
    if value.is_scalar() {
        Ok(value.to_text())
    } else {
        Err(mismatch(ElementType::Str, value))
    }
}

fn coerce_object(value: &Value) -> Result<Value, ArrayError> {
    Ok(value.clone())
}

/// An n-dimensional array with a runtime element type.
#[derive(Clone, Debug, PartialEq)]
pub enum Array {
    /// Boolean elements.
    Bool(ArrayD<bool>),
    /// 32-bit integer elements.
    Int32(ArrayD<i32>),
    /// 64-bit integer elements.
    Int64(ArrayD<i64>),
    /// 32-bit float elements.
    Float32(ArrayD<f32>),
    /// 64-bit float elements.
    Float64(ArrayD<f64>),
    /// String elements.
    Str(ArrayD<String>),
    /// Dynamically typed elements.
    Object(ArrayD<Value>),
    /// Records with named fields.
    Record(RecordArray),
}

impl Array {
    /// A default-filled array (zeros, `false`, empty strings, `Null`).
    pub fn zeros(dtype: &DType, shape: &[usize]) -> Self {
        match dtype {
            DType::Scalar(element) => {
                for_element!(*element, T => T::into_array(ArrayD::from_elem(IxDyn(shape), T::default())))
            }
            DType::Record(schema) => Self::Record(RecordArray::zeros(shape, schema.clone())),
        }
    }

    /// Build a plain array from row-major data.
    pub fn from_shape_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self, ArrayError> {
        let expected: usize = shape.iter().product();
        let found = data.len();
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(T::into_array)
            .map_err(|_| ArrayError::LengthMismatch { expected, found })
    }

    /// Build an `(n, N)` array from fixed-size rows.
    pub fn from_rows<T: Element, const N: usize>(rows: Vec<[T; N]>) -> Self {
        T::into_array(Array2::from(rows).into_dyn())
    }

    /// Leaf element type, or `None` for record arrays.
    pub fn element_type(&self) -> Option<ElementType> {
        match self {
            Self::Bool(_) => Some(ElementType::Bool),
            Self::Int32(_) => Some(ElementType::Int32),
            Self::Int64(_) => Some(ElementType::Int64),
            Self::Float32(_) => Some(ElementType::Float32),
            Self::Float64(_) => Some(ElementType::Float64),
            Self::Str(_) => Some(ElementType::Str),
            Self::Object(_) => Some(ElementType::Object),
            Self::Record(_) => None,
        }
    }

    /// Data type of the elements.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Record(record) => DType::Record(record.schema().clone()),
            _ => self
                .element_type()
                .map_or(DType::Scalar(ElementType::Object), DType::Scalar),
        }
    }

    /// Extents of every dimension.
    pub fn shape(&self) -> &[usize] {
        dispatch!(self, data => data.shape(), record => record.shape())
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Extent of the leading axis (0 for zero-dimensional arrays).
    pub fn len(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    /// Whether the leading axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of elements (records, for record arrays).
    pub fn size(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether this array has named fields.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// The record array, if structured.
    pub fn as_record(&self) -> Option<&RecordArray> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The record array, mutably, if structured.
    pub fn as_record_mut(&mut self) -> Option<&mut RecordArray> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Unwrap into a record array, if structured.
    pub fn into_record(self) -> Option<RecordArray> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Typed storage, if the element type is `T`.
    pub fn typed<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::as_typed(self)
    }

    /// Mutable typed storage, if the element type is `T`.
    pub fn typed_mut<T: Element>(&mut self) -> Option<&mut ArrayD<T>> {
        T::as_typed_mut(self)
    }

    /// Value at `index`.
    ///
    /// A full index yields one element (a [`Value::Record`] for record
    /// arrays); a shorter index yields the sub-array as [`Value::Array`].
    pub fn get(&self, index: &[usize]) -> Option<Value> {
        if !in_bounds(self.shape(), index) {
            return None;
        }
        if let Self::Record(record) = self {
            return record.get(index);
        }
        if index.len() == self.ndim() {
            dispatch!(self, data => data.get(index).map(Element::to_value), _record => None)
        } else {
            Some(Value::Array(self.subarray_unchecked(index)))
        }
    }

    /// Owned copy of the sub-array at the leading `prefix` index.
    pub fn subarray(&self, prefix: &[usize]) -> Option<Array> {
        in_bounds(self.shape(), prefix).then(|| self.subarray_unchecked(prefix))
    }

    pub(crate) fn subarray_unchecked(&self, prefix: &[usize]) -> Array {
        dispatch!(
            self,
            data => Element::into_array(leading_view(data.view(), prefix).to_owned()),
            record => Array::Record(record.subarray_unchecked(prefix))
        )
    }

    /// Owned copy of the sub-array at `index` along `axis`.
    pub fn index_axis(&self, axis: usize, index: usize) -> Result<Array, ArrayError> {
        let shape = self.shape();
        if axis >= shape.len() || index >= shape[axis] {
            return Err(ArrayError::IndexOutOfBounds {
                index: vec![index],
                shape: shape.to_vec(),
            });
        }
        dispatch!(
            self,
            data => Ok(Element::into_array(data.index_axis(Axis(axis), index).to_owned())),
            record => record.index_axis(axis, index).map(Array::Record)
        )
    }

    /// Owned copies of the columns of a two-dimensional array.
    ///
    /// See `recarr_toolkit::column_split` for borrowed column views.
    pub fn column_split(&self) -> Result<Vec<Array>, ArrayError> {
        if self.ndim() != 2 {
            return Err(ArrayError::NotMatrix { ndim: self.ndim() });
        }
        (0..self.shape()[1])
            .map(|j| self.index_axis(1, j))
            .collect()
    }

    /// Store `value` at `index`.
    ///
    /// A full index stores one element. A shorter index accepts a nested
    /// list or an array of the remaining shape, or a scalar that is
    /// broadcast over the whole sub-array.
    ///
    /// `value` is converted in full before anything is written; on error
    /// the array is unchanged.
    pub fn set(&mut self, index: &[usize], value: &Value) -> Result<(), ArrayError> {
        check_index(self.shape(), index)?;
        if index.len() == self.ndim() && !self.is_structured() {
            return self.fill(index, value);
        }
        let block = self.stage(index, value)?;
        self.assign(index, &block)
    }

    /// The sub-array [`Array::set`] would write at `index`, converted to
    /// this array's type. Nothing is written.
    pub fn stage(&self, index: &[usize], value: &Value) -> Result<Array, ArrayError> {
        check_index(self.shape(), index)?;
        let mut block = Self::zeros(&self.dtype(), &self.shape()[index.len()..]);
        block.fill(&[], value)?;
        Ok(block)
    }

    /// Write `value` in place, stopping at the first conversion error.
    pub(crate) fn fill(&mut self, index: &[usize], value: &Value) -> Result<(), ArrayError> {
        check_index(self.shape(), index)?;
        dispatch!(self, data => set_plain(data, index, value), record => record.fill(index, value))
    }

    /// Copy `src` into the sub-array at `prefix`, casting to this array's type.
    pub fn assign(&mut self, prefix: &[usize], src: &Array) -> Result<(), ArrayError> {
        check_index(self.shape(), prefix)?;
        let expected = &self.shape()[prefix.len()..];
        if src.shape() != expected {
            return Err(ArrayError::ShapeMismatch {
                field: "value".to_string(),
                expected: expected.to_vec(),
                found: src.shape().to_vec(),
            });
        }
        let dtype = self.dtype();
        let casted;
        let src = if src.dtype() == dtype {
            src
        } else {
            casted = src.cast(&dtype)?;
            &casted
        };
        dispatch!(
            self,
            data => assign_plain(data, prefix, src),
            record => match src {
                Array::Record(src) => record.assign(prefix, src),
                other => Err(type_mismatch(&dtype, &other.dtype())),
            }
        )
    }

    /// Copy of this array converted to `dtype`.
    ///
    /// Record arrays cast field by field, by position; plain arrays cast
    /// element by element. Plain and record types never cast into each other.
    pub fn cast(&self, dtype: &DType) -> Result<Array, ArrayError> {
        match (self, dtype) {
            (Self::Record(record), DType::Record(schema)) => record.cast(schema).map(Self::Record),
            (_, DType::Scalar(element)) if self.element_type() == Some(*element) => Ok(self.clone()),
            (Self::Record(_), DType::Scalar(_)) | (_, DType::Record(_)) => {
                Err(type_mismatch(dtype, &self.dtype()))
            }
            (_, DType::Scalar(element)) => {
                for_element!(*element, T => cast_plain::<T>(self).map(T::into_array))
            }
        }
    }

    /// All elements in row-major order (records, for record arrays).
    pub fn to_values(&self) -> Vec<Value> {
        dispatch!(
            self,
            data => data.iter().map(Element::to_value).collect(),
            record => record.records().into_iter().map(Value::Record).collect()
        )
    }

    /// Nested-list form of the array; a zero-dimensional array yields its element.
    pub fn to_value(&self) -> Value {
        if self.ndim() == 0 {
            return self.get(&[]).unwrap_or_default();
        }
        Value::List(
            (0..self.len())
                .map(|i| self.subarray_unchecked(&[i]).to_value())
                .collect(),
        )
    }

    /// Wrap an array-like value as an array.
    ///
    /// Arrays are cloned. Nested lists become arrays of the nested shape,
    /// with the element type inferred from the leaves; ragged lists stop
    /// at the ragged level and keep the inner lists as objects. Any other
    /// value becomes a zero-dimensional array.
    pub fn from_value(value: &Value) -> Result<Array, ArrayError> {
        if let Value::Array(array) = value {
            return Ok(array.clone());
        }
        let shape = infer_shape(value);
        let mut leaves = Vec::with_capacity(shape.iter().product());
        collect_leaves(value, shape.len(), &mut leaves);
        let element = infer_element(&leaves);
        Self::from_values(&leaves, &shape, &DType::Scalar(element), &[])
    }

    /// Build an array from one value per position of `shape`.
    ///
    /// Each value fills the `sub_shape` block at its position, so the
    /// result has shape `shape ++ sub_shape`.
    pub fn from_values(
        values: &[Value],
        shape: &[usize],
        dtype: &DType,
        sub_shape: &[usize],
    ) -> Result<Array, ArrayError> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(ArrayError::LengthMismatch {
                expected,
                found: values.len(),
            });
        }
        if let (DType::Scalar(element), true) = (dtype, sub_shape.is_empty()) {
            return for_element!(*element, T => {
                let data = values
                    .iter()
                    .map(T::from_value)
                    .collect::<Result<Vec<T>, _>>()?;
                Self::from_shape_vec(shape, data)
            });
        }
        let mut full = Shape::from_slice(shape);
        full.extend_from_slice(sub_shape);
        let mut out = Self::zeros(dtype, &full);
        for (ix, value) in ndarray::indices(IxDyn(shape)).into_iter().zip(values) {
            out.set(ix.slice(), value)?;
        }
        Ok(out)
    }

    /// Concatenate plain arrays of one element type along the leading axis.
    pub fn concatenate(parts: &[Array]) -> Result<Array, ArrayError> {
        let first = parts.first().ok_or(ArrayError::EmptyInput {
            operation: "concatenate",
        })?;
        let element = first.element_type().ok_or_else(|| ArrayError::NotPlain {
            argument: "arrays".to_string(),
        })?;
        let trailing = first.shape().get(1..).unwrap_or_default();
        for part in parts {
            let found = part.shape();
            if found.is_empty() || &found[1..] != trailing {
                return Err(ArrayError::ShapeMismatch {
                    field: "arrays".to_string(),
                    expected: first.shape().to_vec(),
                    found: found.to_vec(),
                });
            }
        }
        for_element!(element, T => {
            let views = parts
                .iter()
                .map(|part| {
                    T::as_typed(part)
                        .map(|data| data.view())
                        .ok_or_else(|| type_mismatch(&DType::Scalar(element), &part.dtype()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            ndarray::concatenate(Axis(0), &views)
                .map(T::into_array)
                .map_err(|_| ArrayError::ShapeMismatch {
                    field: "arrays".to_string(),
                    expected: first.shape().to_vec(),
                    found: Vec::new(),
                })
        })
    }
}

impl<T: Element> From<ArrayD<T>> for Array {
    fn from(data: ArrayD<T>) -> Self {
        T::into_array(data)
    }
}

impl<T: Element> From<Vec<T>> for Array {
    fn from(data: Vec<T>) -> Self {
        T::into_array(ndarray::Array1::from(data).into_dyn())
    }
}

impl From<Vec<&str>> for Array {
    fn from(data: Vec<&str>) -> Self {
        data.into_iter().map(str::to_string).collect::<Vec<_>>().into()
    }
}

impl From<RecordArray> for Array {
    fn from(record: RecordArray) -> Self {
        Self::Record(record)
    }
}

impl Indexable for Array {
    fn len(&self) -> usize {
        Array::len(self)
    }

    fn item(&self, index: usize) -> Option<Value> {
        self.get(&[index])
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value().to_text())
    }
}

/// Infer the field type able to hold one value per position.
///
/// Records sharing the same field names infer a nested record type; values
/// sharing one nested-list shape infer a sub-shaped leaf field; anything
/// else falls back to an object field.
pub fn infer_field(values: &[Value]) -> (DType, Shape) {
    if let Some(Value::Record(first)) = values.first() {
        let names: Vec<&str> = first.names().collect();
        let uniform = values.iter().all(|value| {
            matches!(value, Value::Record(record) if record.names().eq(names.iter().copied()))
        });
        if uniform {
            let fields = names.iter().enumerate().map(|(i, name)| {
                let column: Vec<Value> = values
                    .iter()
                    .map(|value| {
                        value
                            .as_record()
                            .and_then(|record| record.get_index(i))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect();
                let (dtype, sub_shape) = infer_field(&column);
                FieldDef {
                    name: (*name).to_string(),
                    dtype,
                    sub_shape,
                }
            });
            if let Ok(schema) = RecordSchema::new(fields) {
                return (DType::Record(schema), Shape::new());
            }
        }
        return (DType::Scalar(ElementType::Object), Shape::new());
    }
    let sub_shape = values.first().map(infer_shape).unwrap_or_default();
    if values.iter().any(|value| infer_shape(value) != sub_shape) {
        return (DType::Scalar(ElementType::Object), Shape::new());
    }
    let mut leaves = Vec::new();
    for value in values {
        collect_leaves(value, sub_shape.len(), &mut leaves);
    }
    (DType::Scalar(infer_element(&leaves)), sub_shape)
}

/// Promoted element type of a set of scalar values (`Float64` when empty).
pub fn infer_element(values: &[Value]) -> ElementType {
    values
        .iter()
        .map(Value::element_type)
        .reduce(ElementType::promote)
        .unwrap_or(ElementType::Float64)
}

/// Rectangular nested shape of a value; scalars have an empty shape.
fn infer_shape(value: &Value) -> Shape {
    match value {
        Value::List(items) => {
            let mut shape = Shape::from_slice(&[items.len()]);
            if let Some(first) = items.first() {
                let inner = infer_shape(first);
                if !inner.is_empty() && items[1..].iter().all(|item| infer_shape(item) == inner) {
                    shape.extend_from_slice(&inner);
                }
            }
            shape
        }
        Value::Array(array) => Shape::from_slice(array.shape()),
        _ => Shape::new(),
    }
}

fn collect_leaves(value: &Value, depth: usize, out: &mut Vec<Value>) {
    if depth == 0 {
        out.push(value.clone());
        return;
    }
    match value {
        Value::List(items) => {
            for item in items {
                collect_leaves(item, depth - 1, out);
            }
        }
        Value::Array(array) => out.extend(array.to_values()),
        other => out.push(other.clone()),
    }
}

fn in_bounds(shape: &[usize], index: &[usize]) -> bool {
    index.len() <= shape.len() && index.iter().zip(shape).all(|(i, n)| i < n)
}

pub(crate) fn check_index(shape: &[usize], index: &[usize]) -> Result<(), ArrayError> {
    if in_bounds(shape, index) {
        Ok(())
    } else {
        Err(ArrayError::IndexOutOfBounds {
            index: index.to_vec(),
            shape: shape.to_vec(),
        })
    }
}

pub(crate) fn type_mismatch(expected: &DType, found: &DType) -> ArrayError {
    ArrayError::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

fn leading_view<'a, T>(mut view: ArrayViewD<'a, T>, prefix: &[usize]) -> ArrayViewD<'a, T> {
    for &i in prefix {
        view = view.index_axis_move(Axis(0), i);
    }
    view
}

fn leading_view_mut<'a, T>(
    mut view: ArrayViewMutD<'a, T>,
    prefix: &[usize],
) -> ArrayViewMutD<'a, T> {
    for &i in prefix {
        view = view.index_axis_move(Axis(0), i);
    }
    view
}

fn set_plain<T: Element>(
    data: &mut ArrayD<T>,
    index: &[usize],
    value: &Value,
) -> Result<(), ArrayError> {
    if index.len() == data.ndim() {
        data[index] = T::from_value(value)?;
        return Ok(());
    }
    match value {
        Value::List(items) => {
            let n = data.shape()[index.len()];
            if items.len() != n {
                return Err(ArrayError::ShapeMismatch {
                    field: "value".to_string(),
                    expected: data.shape()[index.len()..].to_vec(),
                    found: infer_shape(value).to_vec(),
                });
            }
            let mut ix = index.to_vec();
            ix.push(0);
            for (i, item) in items.iter().enumerate() {
                ix[index.len()] = i;
                set_plain(data, &ix, item)?;
            }
            Ok(())
        }
        Value::Array(src) => assign_plain(data, index, &src.cast(&DType::Scalar(T::ELEMENT))?),
        scalar => {
            let fill = T::from_value(scalar)?;
            leading_view_mut(data.view_mut(), index).fill(fill);
            Ok(())
        }
    }
}

fn assign_plain<T: Element>(
    data: &mut ArrayD<T>,
    prefix: &[usize],
    src: &Array,
) -> Result<(), ArrayError> {
    let src = T::as_typed(src)
        .ok_or_else(|| type_mismatch(&DType::Scalar(T::ELEMENT), &src.dtype()))?;
    let mut target = leading_view_mut(data.view_mut(), prefix);
    if target.shape() != src.shape() {
        return Err(ArrayError::ShapeMismatch {
            field: "value".to_string(),
            expected: target.shape().to_vec(),
            found: src.shape().to_vec(),
        });
    }
    target.assign(src);
    Ok(())
}

fn cast_plain<T: Element>(src: &Array) -> Result<ArrayD<T>, ArrayError> {
    dispatch!(
        src,
        data => {
            let converted = data
                .iter()
                .map(|element| T::from_value(&element.to_value()))
                .collect::<Result<Vec<T>, _>>()?;
            ArrayD::from_shape_vec(data.raw_dim(), converted).map_err(|_| {
                ArrayError::LengthMismatch {
                    expected: data.len(),
                    found: data.len(),
                }
            })
        },
        record => Err(type_mismatch(
            &DType::Scalar(T::ELEMENT),
            &DType::Record(record.schema().clone())
        ))
    )
}
