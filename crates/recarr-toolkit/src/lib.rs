//! Structured-array toolkit for recarr.
//!
//! Stateless helpers over [`recarr_core`] arrays:
//!
//! - **Predicates:** [`is_array_like`], [`is_numeric`], [`has_keys`],
//!   [`find_missing`].
//! - **Building:** [`recarray`] from named columns, [`add_fields`],
//!   field-wise [`fuse`], and leading-axis [`concatenate`].
//! - **Layout:** [`flatten_dtypes`] and [`unnest`].
//! - **Views:** [`column_split`] and [`fields_view`] borrow the source
//!   array; their `_mut` variants write through to it.
//! - **Mapping:** [`map_records`] applies a function once per record.
//!
//! Every function validates its arguments up front and returns an
//! [`ArrayError`](recarr_core::ArrayError) without producing partial output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod build;
pub mod layout;
pub mod map;
pub mod predicates;
pub mod view;

pub use build::{add_fields, concatenate, fuse, recarray, recarray_from_value};
pub use layout::{flatten_dtypes, unnest, unnest_ref};
pub use map::{map_records, try_map_records};
pub use predicates::{
    find_missing, find_missing_array, has_keys, is_array_like, is_numeric, is_numeric_array,
};
pub use view::{
    column_split, column_split_mut, fields_view, fields_view_mut, FieldsView, FieldsViewMut,
};
