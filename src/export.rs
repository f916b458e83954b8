//! # Export
//!
//! Serializes an analysis result into downloadable files.
//!
//! ## Formats
//! - **JSON** (`chords.json`) - the analysis document echoed back, pretty-printed
//! - **CSV** (`chords.csv`) - `bar,start,end,chord`, one 1-indexed row per segment
//! - **ChordPro** (`chords.pro`) - `[chord]  # 1.00s → 2.50s` per sounding chord,
//!   chord analyses only
//!
//! Exports work on the raw segments, not on measures: a CSV "bar" is a segment.

use std::fmt;

use crate::analysis::{Analysis, Segments};
use crate::error::ChordGridError;
use crate::model::AnalysisMode;
use crate::render::format_seconds;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    ChordPro,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "chordpro" | "pro" => Some(Self::ChordPro),
            _ => None,
        }
    }

    /// Default file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "chords.json",
            Self::Csv => "chords.csv",
            Self::ChordPro => "chords.pro",
        }
    }

    /// Whether this format can be produced for analyses of `mode`.
    pub fn supports(self, mode: AnalysisMode) -> bool {
        !(self == Self::ChordPro && mode == AnalysisMode::Bass)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Csv => f.write_str("CSV"),
            Self::ChordPro => f.write_str("ChordPro"),
        }
    }
}

/// Export an analysis in the given format.
pub fn export(analysis: &Analysis, format: ExportFormat) -> Result<String, ChordGridError> {
    if !format.supports(analysis.mode) {
        return Err(ChordGridError::UnsupportedExport {
            format: format.to_string(),
            mode: analysis.mode.to_string(),
        });
    }
    match format {
        ExportFormat::Json => to_json(analysis),
        ExportFormat::Csv => Ok(to_csv(analysis)),
        ExportFormat::ChordPro => Ok(to_chordpro(analysis)),
    }
}

/// The analysis document as received, with two-space indentation.
pub fn to_json(analysis: &Analysis) -> Result<String, ChordGridError> {
    Ok(serde_json::to_string_pretty(&analysis.raw)?)
}

/// One row per segment. Bass bars put their tabs, space-separated, in the chord column.
pub fn to_csv(analysis: &Analysis) -> String {
    let mut lines = vec!["bar,start,end,chord".to_string()];
    match &analysis.segments {
        Segments::Chords(segments) => {
            for (i, s) in segments.iter().enumerate() {
                lines.push(format!("{},{},{},{}", i + 1, s.start, s.end, s.chord));
            }
        }
        Segments::Bass(bars) => {
            for (i, bar) in bars.iter().enumerate() {
                let tabs: Vec<&str> = bar.tabs.iter().map(|t| t.display.as_str()).collect();
                lines.push(format!("{},{},{},{}", i + 1, bar.start, bar.end, tabs.join(" ")));
            }
        }
    }
    lines.join("\n")
}

/// One ChordPro line per segment, skipping no-chord segments.
pub fn to_chordpro(analysis: &Analysis) -> String {
    let Segments::Chords(segments) = &analysis.segments else {
        return String::new();
    };
    segments
        .iter()
        .filter(|s| !s.is_no_chord())
        .map(|s| {
            format!(
                "[{}]  # {}s → {}s",
                s.chord,
                format_seconds(s.start, 2),
                format_seconds(s.end, 2)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
