//! Benchmark profiles for the recarr structured-array toolkit.
//!
//! Provides deterministic inputs for benchmarks:
//!
//! - [`cloud_columns`]: column map of a seeded point cloud, ready for `recarray`
//! - [`scan_rows`]: raw `x y z intensity` scan rows with a share of all-zero rows
//! - [`reference_scan`]: PTX text of a 100K-point scan with a non-trivial transform

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use indexmap::IndexMap;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use recarr_core::Array;
use recarr_test_utils::{ptx_text, random_cloud};

/// Point count of [`reference_scan`].
pub const REFERENCE_POINTS: usize = 100_000;

/// Transform of [`reference_scan`]: a quarter turn about z, then a shift.
///
/// Row-vector convention, translation in the last row.
pub const REFERENCE_TRANSFORM: [[f64; 4]; 4] = [
    [0.0, 1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [10.0, -5.0, 2.0, 1.0],
];

/// Column map `id`, `coords (3,)`, `intensity` with `n` records.
pub fn cloud_columns(seed: u64, n: usize) -> IndexMap<String, Array> {
    let (_, schema, columns) = random_cloud(seed, n).into_parts();
    let mut map = IndexMap::with_capacity(columns.len() + 1);
    map.insert("id".to_string(), Array::from((0..n as i64).collect::<Vec<_>>()));
    for (field, column) in schema.iter().zip(columns) {
        map.insert(field.name.clone(), column);
    }
    map
}

/// `n` scan rows; every `zero_every`-th row is all zero.
///
/// `zero_every == 0` produces no zero rows.
pub fn scan_rows(seed: u64, n: usize, zero_every: usize) -> Vec<[f64; 4]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut unit = move || (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
    (0..n)
        .map(|i| {
            if zero_every != 0 && i % zero_every == 0 {
                [0.0; 4]
            } else {
                [1.0 + unit() * 50.0, unit() * 50.0, unit() * 10.0, unit()]
            }
        })
        .collect()
}

/// PTX text of [`REFERENCE_POINTS`] points, one in ten all zero.
///
/// The transform moves the origin, so the zero rows survive loading.
pub fn reference_scan(seed: u64) -> String {
    ptx_text(REFERENCE_TRANSFORM, &scan_rows(seed, REFERENCE_POINTS, 10))
}
