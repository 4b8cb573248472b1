//! Core types for recarr structured arrays.
//!
//! This is the leaf crate of the workspace. It defines the data model every
//! other crate works on: element and record types, dynamically typed
//! values, n-dimensional plain and record arrays, and the shared error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod array;
pub mod dtype;
pub mod error;
pub mod record;
pub mod schema;
pub mod traits;
pub mod value;

pub use array::{infer_element, infer_field, Array, Element};
pub use dtype::{DType, ElementType, TypeClass};
pub use error::ArrayError;
pub use record::{positions, FieldMut, RecordArray};
pub use schema::{FieldDef, RecordSchema, Shape};
pub use traits::{Indexable, Keyed};
pub use value::{float_text, Record, Value};
