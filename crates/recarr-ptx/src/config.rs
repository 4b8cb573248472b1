//! Loader configuration.

use crate::error::PtxError;

/// Configuration for reading PTX files.
///
/// Validated when a reader is created; all values are immutable after.
#[derive(Clone, Debug, PartialEq)]
pub struct PtxConfig {
    /// Column separator of header and data lines.
    ///
    /// Default: a single space. Any whitespace separator also accepts runs
    /// of mixed whitespace.
    pub sep: char,

    /// Number of data rows parsed per bulk.
    ///
    /// Default: 500_000. Must be at least 1.
    pub bulk: usize,

    /// Factor applied to the raw intensity column.
    ///
    /// Default: 100. Must be finite.
    pub intensity_scale: f64,
}

impl PtxConfig {
    /// Default column separator.
    pub const DEFAULT_SEP: char = ' ';

    /// Default bulk size in rows.
    pub const DEFAULT_BULK: usize = 500_000;

    /// Default intensity scale factor.
    pub const DEFAULT_INTENSITY_SCALE: f64 = 100.0;

    /// Config with the given separator and defaults for everything else.
    pub fn with_sep(sep: char) -> Self {
        Self {
            sep,
            ..Self::default()
        }
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), PtxError> {
        if self.bulk == 0 {
            return Err(PtxError::InvalidConfig {
                reason: "bulk size must be at least 1".to_string(),
            });
        }
        if !self.intensity_scale.is_finite() {
            return Err(PtxError::InvalidConfig {
                reason: format!("intensity scale {} is not finite", self.intensity_scale),
            });
        }
        if matches!(self.sep, '.' | '-' | '+' | '0'..='9') {
            return Err(PtxError::InvalidConfig {
                reason: format!("separator {:?} collides with number syntax", self.sep),
            });
        }
        Ok(())
    }
}

impl Default for PtxConfig {
    fn default() -> Self {
        Self {
            sep: Self::DEFAULT_SEP,
            bulk: Self::DEFAULT_BULK,
            intensity_scale: Self::DEFAULT_INTENSITY_SCALE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PtxConfig::default();
        assert_eq!(config.sep, ' ');
        assert_eq!(config.bulk, 500_000);
        assert_eq!(config.intensity_scale, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_bulk_and_bad_scale() {
        let config = PtxConfig {
            bulk: 0,
            ..PtxConfig::default()
        };
        assert!(matches!(config.validate(), Err(PtxError::InvalidConfig { .. })));
        let config = PtxConfig {
            intensity_scale: f64::NAN,
            ..PtxConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(PtxConfig::with_sep('.').validate().is_err());
        assert!(PtxConfig::with_sep(',').validate().is_ok());
    }
}
