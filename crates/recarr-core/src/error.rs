//! Error type for the structured-array toolkit.
//!
//! Every variant is an invalid-argument failure: the call was rejected
//! before producing any output, and nothing was mutated.

use std::error::Error;
use std::fmt;

/// Errors from array construction and field manipulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A value without indexed access and iteration was given where an
    /// array-like value is required.
    NotArrayLike {
        /// Kind of the offending value.
        what: String,
    },
    /// A value without enumerable keys was given where a mapping is required.
    NotKeyed {
        /// Kind of the offending value.
        what: String,
    },
    /// A value without a length was given.
    NoLength {
        /// Kind of the offending value.
        what: String,
    },
    /// A plain array was given where a structured (record) array is required.
    NotStructured {
        /// Name of the argument.
        argument: String,
    },
    /// A structured array was given where a plain array is required.
    NotPlain {
        /// Name of the argument.
        argument: String,
    },
    /// An operation needing an exactly two-dimensional array got another rank.
    NotMatrix {
        /// The rank that was supplied.
        ndim: usize,
    },
    /// An operation needing at least one input got none.
    EmptyInput {
        /// The operation that was called.
        operation: &'static str,
    },
    /// The number of record dimensions must be at least one.
    InvalidDims {
        /// The rejected value.
        dims: usize,
    },
    /// A column has fewer dimensions than the requested record dimensions.
    TooFewDims {
        /// Column name.
        field: String,
        /// Dimensions the column has.
        ndim: usize,
        /// Dimensions required.
        required: usize,
    },
    /// Two arrays or columns that must agree in shape do not.
    ShapeMismatch {
        /// Name of the field or argument being checked.
        field: String,
        /// Expected extents.
        expected: Vec<usize>,
        /// Extents found.
        found: Vec<usize>,
    },
    /// A type override names a column absent from the input mapping.
    ColumnNotFound {
        /// The missing column.
        name: String,
    },
    /// A field name is not part of the record type.
    FieldNotFound {
        /// The unknown field.
        name: String,
    },
    /// A field name would appear twice in one record type.
    DuplicateField {
        /// The duplicated name.
        name: String,
    },
    /// Two parallel lists differ in length.
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Length found.
        found: usize,
    },
    /// A value or array cannot be stored as the requested type.
    TypeMismatch {
        /// Requested type.
        expected: String,
        /// Type that was found.
        found: String,
    },
    /// An index is outside the bounds of an array.
    IndexOutOfBounds {
        /// The rejected index.
        index: Vec<usize>,
        /// Shape of the indexed array.
        shape: Vec<usize>,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotArrayLike { what } => write!(f, "expected an array-like value, got {what}"),
            Self::NotKeyed { what } => write!(f, "expected a mapping, got {what}"),
            Self::NoLength { what } => write!(f, "{what} has no length"),
            Self::NotStructured { argument } => {
                write!(f, "'{argument}' has to be a structured array")
            }
            Self::NotPlain { argument } => {
                write!(f, "'{argument}' has to be a plain (non-structured) array")
            }
            Self::NotMatrix { ndim } => {
                write!(f, "expected a two dimensional array, got {ndim} dimensions")
            }
            Self::EmptyInput { operation } => write!(f, "{operation} needs at least one input"),
            Self::InvalidDims { dims } => {
                write!(f, "record dimensions have to be greater zero, got {dims}")
            }
            Self::TooFewDims {
                field,
                ndim,
                required,
            } => write!(
                f,
                "field '{field}' has {ndim} dimensions, needs at least {required}"
            ),
            Self::ShapeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "incompatible shape of '{field}': expected {expected:?}, found {found:?}"
            ),
            Self::ColumnNotFound { name } => write!(f, "column '{name}' not found"),
            Self::FieldNotFound { name } => write!(f, "field '{name}' not found"),
            Self::DuplicateField { name } => write!(f, "field '{name}' already exists"),
            Self::LengthMismatch { expected, found } => {
                write!(f, "expected {expected} entries, found {found}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "cannot store {found} as {expected}")
            }
            Self::IndexOutOfBounds { index, shape } => {
                write!(f, "index {index:?} out of bounds for shape {shape:?}")
            }
        }
    }
}

impl Error for ArrayError {}
