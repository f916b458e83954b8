//! # Error Types
//!
//! This module defines all error types for chordgrid.
//!
//! Only malformed input surfaces as an error. Musically odd input (unparseable
//! chord roots, zero-length measures, a missing tempo) degrades to `"?"`,
//! all-rest grids or an empty chart instead.
//!
//! ## Error Types
//! - `Json` - The analysis result is not valid JSON
//! - `InvalidAnalysis` - Valid JSON with the wrong shape
//! - `Config` - Invalid YAML display configuration
//! - `UnsupportedExport` - Export format not offered for the analysis mode
//! - `Io` - Reading or writing files from the CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordGridError {
    /// Malformed analysis JSON.
    ///
    /// # Example
    /// ```
    /// # use chordgrid::{Analysis, ChordGridError};
    /// let err = Analysis::from_json("{ not json").unwrap_err();
    /// assert!(matches!(err, ChordGridError::Json(_)));
    /// ```
    #[error("Invalid analysis JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but does not describe an analysis result.
    ///
    /// # Example
    /// ```
    /// # use chordgrid::ChordGridError;
    /// let err = ChordGridError::InvalidAnalysis("segment 3 has no chord".to_string());
    /// assert_eq!(err.to_string(), "Invalid analysis: segment 3 has no chord");
    /// ```
    #[error("Invalid analysis: {0}")]
    InvalidAnalysis(String),

    /// Invalid display configuration.
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("{format} export is not available in {mode} mode")]
    UnsupportedExport { format: String, mode: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
