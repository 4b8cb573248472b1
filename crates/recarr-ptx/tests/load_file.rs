use std::io::Write;

use proptest::prelude::*;
use recarr_core::Value;
use recarr_ptx::{load_ptx, PtxConfig, PtxError};
use recarr_test_utils::{ptx_text, IDENTITY4};

fn write_temp(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_transformed_scan_from_disk() {
    let mut m = IDENTITY4;
    m[3] = [100.0, 200.0, 0.0, 1.0];
    let rows = [[1.0, 2.0, 3.0, 0.1], [0.0, 0.0, 0.0, 0.0], [4.0, 5.0, 6.0, 0.2]];
    let file = write_temp(&ptx_text(m, &rows));

    let cloud = load_ptx(file.path(), PtxConfig::default()).unwrap();
    assert_eq!(cloud.header.point_count(), Some(3));
    // The all-zero row is moved away from the origin by the translation.
    assert_eq!(cloud.dropped, 0);
    assert_eq!(cloud.records.shape(), &[3]);
    let first = cloud.records.record(&[0]).unwrap();
    assert_eq!(
        first["coords"],
        Value::Array(vec![101.0, 202.0, 3.0].into())
    );
    assert_eq!(first["intensity"], Value::Float(10.0));
}

#[test]
fn comma_separated_scan() {
    let text = ptx_text(IDENTITY4, &[[1.0, 2.0, 3.0, 0.5]]).replace(' ', ",");
    let file = write_temp(&text);
    let cloud = load_ptx(file.path(), PtxConfig::with_sep(',')).unwrap();
    assert_eq!(cloud.records.len(), 1);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_ptx(dir.path().join("absent.ptx"), PtxConfig::default()).unwrap_err();
    assert!(matches!(err, PtxError::Io(_)));
}

#[test]
fn truncated_header_is_header_error() {
    let file = write_temp("3\n1\n0 0 0\n1 0 0\n");
    let err = load_ptx(file.path(), PtxConfig::default()).unwrap_err();
    assert!(matches!(err, PtxError::Header { line: 4, .. }));
}

proptest! {
    #[test]
    fn bulk_size_does_not_change_result(
        rows in prop::collection::vec(
            prop::array::uniform4(-50i32..50).prop_map(|r| r.map(f64::from)),
            0..40,
        ),
        bulk in 1usize..8,
    ) {
        let text = ptx_text(IDENTITY4, &rows);
        let file = write_temp(&text);
        let whole = load_ptx(file.path(), PtxConfig::default()).unwrap();
        let config = PtxConfig { bulk, ..PtxConfig::default() };
        let chunked = load_ptx(file.path(), config).unwrap();
        prop_assert_eq!(&whole, &chunked);

        let zeros = rows.iter().filter(|r| r[..3].iter().all(|&v| v == 0.0)).count();
        prop_assert_eq!(whole.dropped, zeros);
        prop_assert_eq!(whole.records.len(), rows.len() - zeros);
    }
}
