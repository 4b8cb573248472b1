//! Record-wise mapping.

use ndarray::Dimension;
use recarr_core::{infer_field, positions, Array, ArrayError, DType, Value};

/// Apply `func` to every record of `array` and collect the results.
///
/// For a record array `func` receives one [`Value::Record`] per position of
/// the record shape; for a plain array it receives each element. `func`
/// runs exactly once per position, in row-major order.
///
/// With `output = Some(dtype)` the results are stored as `dtype`: record
/// types take [`Value::Record`] results by name or [`Value::List`] results by
/// position. Without it the type is inferred from the results. The output
/// has the shape of `array`, followed by the common shape of list results.
///
/// # Errors
///
/// [`ArrayError::TypeMismatch`] / [`ArrayError::ShapeMismatch`] /
/// [`ArrayError::FieldNotFound`] when a result does not fit the output type.
pub fn map_records<F>(array: &Array, mut func: F, output: Option<&DType>) -> Result<Array, ArrayError>
where
    F: FnMut(Value) -> Value,
{
    try_map_records(array, |value| Ok(func(value)), output)
}

/// Fallible [`map_records`]: stops at the first error returned by `func`.
///
/// # Errors
///
/// The first error of `func`, or as [`map_records`].
pub fn try_map_records<F>(
    array: &Array,
    mut func: F,
    output: Option<&DType>,
) -> Result<Array, ArrayError>
where
    F: FnMut(Value) -> Result<Value, ArrayError>,
{
    let shape = array.shape();
    let mut results = Vec::with_capacity(array.size());
    for ix in positions(shape) {
        let value = array
            .get(ix.slice())
            .ok_or_else(|| ArrayError::IndexOutOfBounds {
                index: ix.slice().to_vec(),
                shape: shape.to_vec(),
            })?;
        results.push(func(value)?);
    }

    let (inferred, sub_shape) = infer_field(&results);
    match output {
        Some(dtype @ DType::Record(_)) => Array::from_values(&results, shape, dtype, &[]),
        Some(dtype) => Array::from_values(&results, shape, dtype, &sub_shape),
        None => Array::from_values(&results, shape, &inferred, &sub_shape),
    }
}
