//! PTX point-cloud text fixtures.

use std::fmt::Write as _;

/// 4x4 identity transform.
pub const IDENTITY4: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// PTX text for one scan with the given transform and `x y z intensity` rows.
///
/// The header declares `rows.len()` columns and a single row; the scanner
/// sits at the origin with axis-aligned orientation.
pub fn ptx_text(transform: [[f64; 4]; 4], rows: &[[f64; 4]]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rows.len());
    let _ = writeln!(out, "1");
    let _ = writeln!(out, "0 0 0");
    let _ = writeln!(out, "1 0 0");
    let _ = writeln!(out, "0 1 0");
    let _ = writeln!(out, "0 0 1");
    for row in transform {
        let _ = writeln!(out, "{} {} {} {}", row[0], row[1], row[2], row[3]);
    }
    for row in rows {
        let _ = writeln!(out, "{} {} {} {}", row[0], row[1], row[2], row[3]);
    }
    out
}
