//! Test fixtures for recarr development.
//!
//! Small record arrays with known contents, column-map builders for
//! `recarray`, seeded random point data, and PTX text generation (see
//! [`fixtures`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexMap;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use recarr_core::{Array, Element, ElementType, FieldDef, RecordArray, RecordSchema};

pub use fixtures::{ptx_text, IDENTITY4};

/// Column map with one column.
pub fn single_column<T: Element>(name: &str, data: Vec<T>) -> IndexMap<String, Array> {
    columns([(name, Array::from(data))])
}

/// Column map from `(name, column)` pairs, in the order given.
pub fn columns<'a>(pairs: impl IntoIterator<Item = (&'a str, Array)>) -> IndexMap<String, Array> {
    pairs
        .into_iter()
        .map(|(name, column)| (name.to_string(), column))
        .collect()
}

/// Four records with fields `a: i8 = [1, 2, 3, 4]` and `b: f8 = [5, 6, 7, 8]`.
pub fn ab_records() -> Array {
    let schema = RecordSchema::new([
        FieldDef::scalar("a", ElementType::Int64),
        FieldDef::scalar("b", ElementType::Float64),
    ])
    .expect("unique field names");
    let columns = vec![
        Array::from(vec![1i64, 2, 3, 4]),
        Array::from(vec![5.0, 6.0, 7.0, 8.0]),
    ];
    Array::Record(RecordArray::from_columns(&[4], schema, columns).expect("valid columns"))
}

/// Record type of a point cloud: `coords: f8 (3,)` and `intensity: f8`.
pub fn xyz_schema() -> RecordSchema {
    RecordSchema::new([
        FieldDef::vector("coords", ElementType::Float64, 3),
        FieldDef::scalar("intensity", ElementType::Float64),
    ])
    .expect("unique field names")
}

/// Three points on the unit axes with intensities 0.1, 0.2, 0.3.
pub fn xyz_records() -> Array {
    let columns = vec![
        Array::from_rows(vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
        Array::from(vec![0.1, 0.2, 0.3]),
    ];
    Array::Record(RecordArray::from_columns(&[3], xyz_schema(), columns).expect("valid columns"))
}

/// Seeded random point cloud with `n` records of [`xyz_schema`].
///
/// Coordinates lie in `[-100, 100)`, intensities in `[0, 1)`.
pub fn random_cloud(seed: u64, n: usize) -> RecordArray {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut unit = move || (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
    let coords: Vec<[f64; 3]> = (0..n)
        .map(|_| [0; 3].map(|_| unit() * 200.0 - 100.0))
        .collect();
    let intensity: Vec<f64> = (0..n).map(|_| unit()).collect();
    RecordArray::from_columns(
        &[n],
        xyz_schema(),
        vec![Array::from_rows(coords), Array::from(intensity)],
    )
    .expect("valid columns")
}
