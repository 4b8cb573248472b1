//! The ten-line PTX scan header.

use std::io::BufRead;

use log::debug;

use crate::error::PtxError;

/// Number of header lines preceding the data rows of a scan.
pub const HEADER_LINES: usize = 10;

/// Parsed header of one PTX scan.
#[derive(Clone, Debug, PartialEq)]
pub struct PtxHeader {
    /// Number of columns of the scan grid.
    pub columns: usize,
    /// Number of rows of the scan grid.
    pub rows: usize,
    /// Scanner registration: position followed by the first two axes.
    pub scanner: [[f64; 3]; 3],
    /// Homogeneous transform from scanner to project coordinates, applied
    /// to row vectors `[x y z 1]`.
    pub transform: [[f64; 4]; 4],
}

impl PtxHeader {
    /// Parse the first [`HEADER_LINES`] lines of a scan.
    ///
    /// Line 5 (the scanner's third axis) is not used.
    pub fn parse(lines: &[&str], sep: char) -> Result<Self, PtxError> {
        if lines.len() < HEADER_LINES {
            return Err(PtxError::Header {
                line: lines.len(),
                reason: format!("expected {HEADER_LINES} header lines"),
            });
        }
        let columns = parse_count(lines[0], 0)?;
        let rows = parse_count(lines[1], 1)?;
        let mut scanner = [[0.0; 3]; 3];
        for (i, row) in scanner.iter_mut().enumerate() {
            *row = parse_row(lines[2 + i], 2 + i, sep)?;
        }
        let mut transform = [[0.0; 4]; 4];
        for (i, row) in transform.iter_mut().enumerate() {
            *row = parse_row(lines[6 + i], 6 + i, sep)?;
        }
        Ok(Self {
            columns,
            rows,
            scanner,
            transform,
        })
    }

    /// Read and parse the header from the start of a scan.
    pub fn read<R: BufRead>(reader: &mut R, sep: char) -> Result<Self, PtxError> {
        let mut lines = Vec::with_capacity(HEADER_LINES);
        for line in 0..HEADER_LINES {
            let mut buf = String::new();
            if reader.read_line(&mut buf)? == 0 {
                return Err(PtxError::Header {
                    line,
                    reason: "unexpected end of file".to_string(),
                });
            }
            lines.push(buf);
        }
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let header = Self::parse(&lines, sep)?;
        debug!(
            "ptx header: {}x{} grid, translation {:?}",
            header.columns, header.rows, header.transform[3]
        );
        Ok(header)
    }

    /// Number of points the scan grid declares, or `None` if
    /// `columns * rows` overflows.
    pub fn point_count(&self) -> Option<usize> {
        self.columns.checked_mul(self.rows)
    }
}

/// Trimmed fields of a line; a blank line has none.
///
/// Runs of whitespace count as one separator when `sep` is whitespace.
/// Any other separator keeps empty fields in place, except one left by a
/// trailing separator.
pub(crate) fn split_fields(line: &str, sep: char) -> Vec<&str> {
    if sep.is_whitespace() {
        return line.split_whitespace().collect();
    }
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    let mut fields: Vec<&str> = line.split(sep).map(str::trim).collect();
    if fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_count(text: &str, line: usize) -> Result<usize, PtxError> {
    text.trim().parse().map_err(|_| PtxError::Header {
        line,
        reason: format!("expected a count, found {:?}", text.trim()),
    })
}

fn parse_row<const N: usize>(text: &str, line: usize, sep: char) -> Result<[f64; N], PtxError> {
    let fields = split_fields(text, sep);
    if fields.len() != N {
        return Err(PtxError::Header {
            line,
            reason: format!("expected {N} values, found {}", fields.len()),
        });
    }
    let mut row = [0.0; N];
    for (i, (value, field)) in row.iter_mut().zip(fields).enumerate() {
        if field.is_empty() {
            return Err(PtxError::Header {
                line,
                reason: format!("empty field {i}"),
            });
        }
        *value = field.parse().map_err(|_| PtxError::Header {
            line,
            reason: format!("invalid number {field:?}"),
        })?;
    }
    Ok(row)
}
