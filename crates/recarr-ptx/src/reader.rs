//! Bulk reader for PTX data rows.
//!
//! [`PtxReader`] parses the header on construction and then hands out
//! data rows in bulks of [`PtxConfig::bulk`] rows, so large scans are
//! transformed and filtered without holding the raw text in memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use recarr_core::{Array, ArrayError, ElementType, FieldDef, RecordArray};
use recarr_toolkit::recarray;

use crate::config::PtxConfig;
use crate::error::PtxError;
use crate::header::{split_fields, PtxHeader, HEADER_LINES};
use crate::transform::transform_points;

/// Columns read from every data row: `x y z intensity`.
const ROW_WIDTH: usize = 4;

/// A loaded PTX scan.
#[derive(Clone, Debug, PartialEq)]
pub struct PtxCloud {
    /// The scan header.
    pub header: PtxHeader,
    /// Points with fields `coords: f8 (3,)` and `intensity: f8`, in
    /// project coordinates.
    pub records: RecordArray,
    /// Number of rows dropped as missing (all coordinates zero).
    pub dropped: usize,
}

/// Reads PTX data from a buffered text stream.
///
/// Generic over `R: BufRead` so tests can use `Cursor<&str>` and
/// production code can use `BufReader<File>`.
pub struct PtxReader<R: BufRead> {
    reader: R,
    config: PtxConfig,
    header: PtxHeader,
    line: usize,
    buf: String,
}

impl<R: BufRead> PtxReader<R> {
    /// Validate `config` and read the scan header.
    pub fn new(mut reader: R, config: PtxConfig) -> Result<Self, PtxError> {
        config.validate()?;
        let header = PtxHeader::read(&mut reader, config.sep)?;
        Ok(Self {
            reader,
            config,
            header,
            line: HEADER_LINES,
            buf: String::new(),
        })
    }

    /// The scan header.
    pub fn header(&self) -> &PtxHeader {
        &self.header
    }

    /// The loader configuration.
    pub fn config(&self) -> &PtxConfig {
        &self.config
    }

    /// Next bulk of raw `(n, 4)` rows, or `None` once the stream is exhausted.
    ///
    /// Blank lines are skipped; columns beyond the fourth are ignored. An
    /// empty field between two separators is a [`PtxError::Row`].
    pub fn next_bulk(&mut self) -> Result<Option<Array2<f64>>, PtxError> {
        let mut rows: Vec<[f64; ROW_WIDTH]> = Vec::new();
        while rows.len() < self.config.bulk {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                break;
            }
            let line = self.line;
            self.line += 1;
            let fields = split_fields(&self.buf, self.config.sep);
            if fields.is_empty() {
                continue;
            }
            if fields.len() < ROW_WIDTH {
                return Err(PtxError::Row {
                    line,
                    reason: format!(
                        "expected at least {ROW_WIDTH} columns, found {}",
                        fields.len()
                    ),
                });
            }
            if let Some(i) = fields.iter().position(|field| field.is_empty()) {
                return Err(PtxError::Row {
                    line,
                    reason: format!("empty field {i}"),
                });
            }
            let mut row = [0.0; ROW_WIDTH];
            for (value, field) in row.iter_mut().zip(&fields) {
                *value = field.parse().map_err(|_| PtxError::Row {
                    line,
                    reason: format!("invalid number {field:?}"),
                })?;
            }
            rows.push(row);
        }
        if rows.is_empty() {
            return Ok(None);
        }
        debug!("ptx bulk: {} rows up to line {}", rows.len(), self.line);
        Ok(Some(Array2::from(rows)))
    }

    /// Read all remaining rows into a point cloud.
    ///
    /// Coordinates are transformed with the header's transform, intensities
    /// scaled by [`PtxConfig::intensity_scale`], and rows whose transformed
    /// coordinates are all exactly zero are dropped.
    pub fn read_cloud(mut self) -> Result<PtxCloud, PtxError> {
        let mut coords: Vec<f64> = Vec::new();
        let mut intensity: Vec<f64> = Vec::new();
        let mut dropped = 0;
        while let Some(bulk) = self.next_bulk()? {
            let (bulk_coords, bulk_intensity) = self.process(bulk.view())?;
            dropped += bulk.nrows() - bulk_intensity.len();
            coords.extend(bulk_coords.iter());
            intensity.extend(bulk_intensity.iter());
        }
        let n = intensity.len();
        debug!("ptx cloud: {n} points kept, {dropped} dropped");

        let coords = Array2::from_shape_vec((n, 3), coords).map_err(|_| {
            ArrayError::LengthMismatch {
                expected: n * 3,
                found: n,
            }
        })?;
        let mut columns = IndexMap::new();
        columns.insert("coords".to_string(), Array::from(coords.into_dyn()));
        columns.insert("intensity".to_string(), Array::from(intensity));
        let fixed = [
            FieldDef::vector("coords", ElementType::Float64, 3),
            FieldDef::scalar("intensity", ElementType::Float64),
        ];
        let records = recarray(&columns, &fixed, 1)?;
        Ok(PtxCloud {
            header: self.header,
            records,
            dropped,
        })
    }

    fn process(&self, bulk: ArrayView2<'_, f64>) -> Result<(Array2<f64>, Array1<f64>), PtxError> {
        let coords = transform_points(bulk.slice(s![.., ..3]), &self.header.transform)?;
        let scale = self.config.intensity_scale;
        let intensity = bulk.column(3).mapv(|v| v * scale);
        let keep: Vec<usize> = coords
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, point)| point.iter().any(|&v| v != 0.0))
            .map(|(i, _)| i)
            .collect();
        Ok((
            coords.select(Axis(0), &keep),
            intensity.select(Axis(0), &keep),
        ))
    }
}

/// Load a PTX file.
///
/// # Errors
///
/// [`PtxError::Io`] if the file cannot be read, [`PtxError::Header`] /
/// [`PtxError::Row`] for malformed content, [`PtxError::InvalidConfig`]
/// for an unusable `config`.
pub fn load_ptx(path: impl AsRef<Path>, config: PtxConfig) -> Result<PtxCloud, PtxError> {
    let path = path.as_ref();
    debug!("loading ptx file {}", path.display());
    let file = File::open(path)?;
    PtxReader::new(BufReader::new(file), config)?.read_cloud()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recarr_core::Value;
    use recarr_test_utils::{ptx_text, IDENTITY4};
    use std::io::Cursor;

    fn reader(text: &str, bulk: usize) -> PtxReader<Cursor<&str>> {
        let config = PtxConfig {
            bulk,
            ..PtxConfig::default()
        };
        PtxReader::new(Cursor::new(text), config).unwrap()
    }

    #[test]
    fn bulks_respect_size() {
        let text = ptx_text(IDENTITY4, &[[1.0, 1.0, 1.0, 0.5]; 5]);
        let mut r = reader(&text, 2);
        let sizes: Vec<usize> = std::iter::from_fn(|| r.next_bulk().unwrap())
            .map(|bulk| bulk.nrows())
            .collect();
        assert_eq!(sizes, [2, 2, 1]);
    }

    #[test]
    fn cloud_scales_and_filters() {
        let rows = [
            [1.0, 2.0, 3.0, 0.5],
            [0.0, 0.0, 0.0, 0.9],
            [0.0, 0.0, 4.0, 0.25],
        ];
        let cloud = reader(&ptx_text(IDENTITY4, &rows), 2).read_cloud().unwrap();
        assert_eq!(cloud.dropped, 1);
        assert_eq!(cloud.records.shape(), &[2]);
        let intensity = cloud.records.field("intensity").unwrap();
        assert_eq!(intensity, &Array::from(vec![50.0, 25.0]));
        let second = cloud.records.record(&[1]).unwrap();
        assert_eq!(second["coords"], Value::Array(Array::from(vec![0.0, 0.0, 4.0])));
    }

    #[test]
    fn zero_check_uses_transformed_coordinates() {
        let mut m = IDENTITY4;
        m[3] = [1.0, 0.0, 0.0, 1.0];
        let rows = [[0.0, 0.0, 0.0, 1.0], [-1.0, 0.0, 0.0, 1.0]];
        let cloud = reader(&ptx_text(m, &rows), 10).read_cloud().unwrap();
        assert_eq!(cloud.dropped, 1);
        assert_eq!(
            cloud.records.field("coords").unwrap().get(&[0, 0]),
            Some(Value::Float(1.0))
        );
    }

    #[test]
    fn extra_columns_and_blank_lines() {
        let mut text = ptx_text(IDENTITY4, &[]);
        text.push_str("1 2 3 0.1 255 255 255\n\n4 5 6 0.2 0 0 0\n");
        let cloud = reader(&text, 10).read_cloud().unwrap();
        assert_eq!(cloud.records.shape(), &[2]);
    }

    #[test]
    fn bad_row_reports_line() {
        let mut text = ptx_text(IDENTITY4, &[[1.0, 2.0, 3.0, 0.5]]);
        text.push_str("1 2\n");
        match reader(&text, 10).read_cloud() {
            Err(PtxError::Row { line, .. }) => assert_eq!(line, 11),
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn empty_field_is_not_skipped() {
        let mut text = ptx_text(IDENTITY4, &[[1.0, 2.0, 3.0, 0.5]]).replace(' ', ",");
        text.push_str("1,,2,3,4\n");
        let config = PtxConfig::with_sep(',');
        let result = PtxReader::new(Cursor::new(text.as_str()), config)
            .unwrap()
            .read_cloud();
        match result {
            Err(PtxError::Row { line, reason }) => {
                assert_eq!(line, 11);
                assert!(reason.contains("empty field 1"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_separator_is_accepted() {
        let mut text = ptx_text(IDENTITY4, &[]).replace(' ', ",");
        text.push_str("1,2,3,0.5,\n");
        let cloud = PtxReader::new(Cursor::new(text.as_str()), PtxConfig::with_sep(','))
            .unwrap()
            .read_cloud()
            .unwrap();
        assert_eq!(cloud.records.len(), 1);
    }

    #[test]
    fn empty_scan_gives_empty_cloud() {
        let cloud = reader(&ptx_text(IDENTITY4, &[]), 10).read_cloud().unwrap();
        assert!(cloud.records.is_empty());
        assert_eq!(cloud.records.field("coords").unwrap().shape(), &[0, 3]);
    }

    #[test]
    fn invalid_config_is_rejected_before_reading() {
        let config = PtxConfig {
            bulk: 0,
            ..PtxConfig::default()
        };
        assert!(matches!(
            PtxReader::new(Cursor::new(""), config),
            Err(PtxError::InvalidConfig { .. })
        ));
    }
}
