//! Error types for PTX loading.

use std::fmt;
use std::io;

use recarr_core::ArrayError;

/// Errors that can occur while reading a PTX file.
#[derive(Debug)]
pub enum PtxError {
    /// An I/O error occurred while reading.
    Io(io::Error),
    /// The loader configuration is unusable.
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
    /// One of the ten header lines is missing or malformed.
    Header {
        /// Zero-based line number in the file.
        line: usize,
        /// Human-readable description of what went wrong.
        reason: String,
    },
    /// A data row could not be parsed.
    Row {
        /// Zero-based line number in the file.
        line: usize,
        /// Human-readable description of what went wrong.
        reason: String,
    },
    /// Assembling the record array failed.
    Array(ArrayError),
}

impl fmt::Display for PtxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidConfig { reason } => write!(f, "invalid PTX config: {reason}"),
            Self::Header { line, reason } => write!(f, "malformed header line {line}: {reason}"),
            Self::Row { line, reason } => write!(f, "malformed row at line {line}: {reason}"),
            Self::Array(e) => write!(f, "record array error: {e}"),
        }
    }
}

impl std::error::Error for PtxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Array(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PtxError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ArrayError> for PtxError {
    fn from(e: ArrayError) -> Self {
        Self::Array(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn source_chains_inner_errors() {
        let err = PtxError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(err.source().is_some());
        let err = PtxError::from(ArrayError::NotMatrix { ndim: 1 });
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("expected a two dimensional array, got 1 dimensions".to_string())
        );
        let err = PtxError::Row {
            line: 12,
            reason: "x".into(),
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "malformed row at line 12: x");
    }
}
