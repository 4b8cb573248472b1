//! recarr: structured (record) arrays for Rust.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! recarr sub-crates. For most users, adding `recarr` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use recarr::prelude::*;
//!
//! // Two columns with four records each.
//! let mut fields = IndexMap::new();
//! fields.insert("id".to_string(), Array::from(vec![1i64, 2, 3, 4]));
//! fields.insert("mass".to_string(), Array::from(vec![0.5, 1.5, 2.5, 3.5]));
//! let rec = recarray(&fields, &[], 1).unwrap();
//! assert_eq!(rec.shape(), &[4]);
//!
//! // Append a zero-filled vector field.
//! let rec = add_fields(
//!     &Array::Record(rec),
//!     &[FieldDef::vector("pos", ElementType::Float64, 3)],
//!     None,
//! )
//! .unwrap();
//! assert_eq!(rec.names().collect::<Vec<_>>(), ["id", "mass", "pos"]);
//!
//! // One call per record.
//! let doubled = map_records(
//!     &Array::Record(rec),
//!     |value| {
//!         let mass = value.as_record().and_then(|r| r.get("mass")).and_then(Value::as_f64);
//!         Value::Float(mass.unwrap_or(f64::NAN) * 2.0)
//!     },
//!     None,
//! )
//! .unwrap();
//! assert_eq!(doubled, Array::from(vec![1.0, 3.0, 5.0, 7.0]));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `recarr-core` | `Array`, `RecordArray`, schemas, values, errors |
//! | [`toolkit`] | `recarr-toolkit` | Predicates, building, layout, views, mapping |
//! | [`ptx`] | `recarr-ptx` | PTX point-cloud loader |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core array and record types (`recarr-core`).
///
/// Contains [`types::Array`], [`types::RecordArray`], the record schema
/// types, the dynamic [`types::Value`] and the shared [`types::ArrayError`].
pub use recarr_core as types;

/// Stateless helpers over record arrays (`recarr-toolkit`).
///
/// Building ([`toolkit::recarray`], [`toolkit::fuse`]), layout
/// ([`toolkit::unnest`]), zero-copy views ([`toolkit::fields_view`]) and
/// [`toolkit::map_records`].
pub use recarr_toolkit as toolkit;

/// PTX point-cloud loading (`recarr-ptx`).
///
/// [`ptx::load_ptx`] reads a whole file; [`ptx::PtxReader`] works over any
/// buffered reader.
pub use recarr_ptx as ptx;

/// Common imports for typical recarr usage.
///
/// ```rust
/// use recarr::prelude::*;
/// ```
pub mod prelude {
    pub use indexmap::IndexMap;

    // Core types
    pub use recarr_core::{
        Array, ArrayError, DType, ElementType, FieldDef, Record, RecordArray, RecordSchema,
        TypeClass, Value,
    };

    // Toolkit
    pub use recarr_toolkit::{
        add_fields, column_split, concatenate, fields_view, find_missing, flatten_dtypes, fuse,
        has_keys, is_array_like, is_numeric, map_records, recarray, unnest,
    };

    // PTX
    pub use recarr_ptx::{load_ptx, PtxConfig, PtxError};
}
