//! Homogeneous coordinate transforms.

use ndarray::{s, Array2, ArrayView2};
use recarr_core::ArrayError;

/// Apply a 4x4 homogeneous transform to `(n, 3)` coordinates.
///
/// Each point is taken as the row vector `[x y z 1]` and multiplied by
/// `matrix` from the right, so the translation sits in the last row.
/// Results with a projective weight other than 0 or 1 are normalised.
pub fn transform_points(
    coords: ArrayView2<'_, f64>,
    matrix: &[[f64; 4]; 4],
) -> Result<Array2<f64>, ArrayError> {
    if coords.ncols() != 3 {
        return Err(ArrayError::ShapeMismatch {
            field: "coords".to_string(),
            expected: vec![coords.nrows(), 3],
            found: coords.shape().to_vec(),
        });
    }
    let m = Array2::from(matrix.to_vec());
    let mut homogeneous = Array2::<f64>::ones((coords.nrows(), 4));
    homogeneous.slice_mut(s![.., ..3]).assign(&coords);
    let mut out = homogeneous.dot(&m);
    for mut row in out.rows_mut() {
        let w = row[3];
        if w != 0.0 && w != 1.0 {
            row.mapv_inplace(|v| v / w);
        }
    }
    Ok(out.slice(s![.., ..3]).to_owned())
}
