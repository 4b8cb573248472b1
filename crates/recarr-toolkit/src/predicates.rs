//! Capability checks and missing-value detection.

use ndarray::{ArrayD, IxDyn};
use recarr_core::{Array, ArrayError, TypeClass, Value};

/// Whether `value` supports indexed access and iteration.
///
/// Lists and arrays are array-like. Scalars, `None`, strings, mappings and
/// single records are not.
pub fn is_array_like(value: &Value) -> bool {
    value.as_indexable().is_some()
}

/// Whether `value` is a mapping with enumerable keys.
///
/// Sequences and record arrays are not keyed: record arrays expose their
/// field names through their schema instead.
pub fn has_keys(value: &Value) -> bool {
    value.as_keyed().is_some()
}

/// Whether the elements of an array-like value are numeric.
///
/// The value is wrapped as an array first; its element type must belong to
/// one of `allowed` (by default the 32 and 64 bit integer and float types).
///
/// # Errors
///
/// [`ArrayError::NotArrayLike`] if `value` is not array-like.
pub fn is_numeric(value: &Value, allowed: Option<&[TypeClass]>) -> Result<bool, ArrayError> {
    if !is_array_like(value) {
        return Err(ArrayError::NotArrayLike {
            what: value.kind().to_string(),
        });
    }
    let array = Array::from_value(value)?;
    Ok(is_numeric_array(&array, allowed))
}

/// [`is_numeric`] on an existing array.
pub fn is_numeric_array(array: &Array, allowed: Option<&[TypeClass]>) -> bool {
    let dtype = array.dtype();
    allowed
        .unwrap_or(&TypeClass::DEFAULT_NUMERIC)
        .iter()
        .any(|class| class.contains(&dtype))
}

/// Elementwise missing-value mask of an array-like value.
///
/// An element is missing if it is `None` or if its text form is exactly
/// `nan`. The text comparison also catches the literal string `"nan"` in
/// string and object data. The mask has the shape of the wrapped value.
///
/// # Errors
///
/// [`ArrayError::NoLength`] for values without a length (scalars, `None`).
pub fn find_missing(value: &Value) -> Result<ArrayD<bool>, ArrayError> {
    if value.len().is_none() {
        return Err(ArrayError::NoLength {
            what: value.kind().to_string(),
        });
    }
    let array = Array::from_value(value)?;
    missing_mask(&array)
}

/// [`find_missing`] on an existing array.
///
/// # Errors
///
/// [`ArrayError::NoLength`] for zero-dimensional arrays and
/// [`ArrayError::NotPlain`] for record arrays.
pub fn find_missing_array(array: &Array) -> Result<ArrayD<bool>, ArrayError> {
    if array.ndim() == 0 {
        return Err(ArrayError::NoLength {
            what: "zero-dimensional array".to_string(),
        });
    }
    missing_mask(array)
}

fn missing_mask(array: &Array) -> Result<ArrayD<bool>, ArrayError> {
    match array {
        Array::Record(_) => Err(ArrayError::NotPlain {
            argument: "data".to_string(),
        }),
        // Float text is "nan" exactly for NaN.
        Array::Float64(data) => Ok(data.mapv(f64::is_nan)),
        Array::Float32(data) => Ok(data.mapv(f32::is_nan)),
        Array::Bool(data) => Ok(ArrayD::from_elem(data.raw_dim(), false)),
        Array::Int32(data) => Ok(ArrayD::from_elem(data.raw_dim(), false)),
        Array::Int64(data) => Ok(ArrayD::from_elem(data.raw_dim(), false)),
        other => {
            let mask: Vec<bool> = other.to_values().iter().map(is_missing).collect();
            ArrayD::from_shape_vec(IxDyn(other.shape()), mask).map_err(|_| {
                ArrayError::LengthMismatch {
                    expected: other.size(),
                    found: other.size(),
                }
            })
        }
    }
}

fn is_missing(value: &Value) -> bool {
    value.is_null() || value.to_text() == "nan"
}
