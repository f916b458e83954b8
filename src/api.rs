//! # Public API
//!
//! Entry points that run the whole pipeline on an analysis result.
//!
//! ## Pipeline
//! 1. Parse the analysis JSON ([`Analysis::from_json`])
//! 2. Group chord segments into measures ([`group_into_measures`])
//! 3. Render each measure's beat grid with Nashville numbers ([`render_chart`])
//!
//! Bass analyses skip steps 2 and 3's grid; their bars are shown as received.
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordgrid::render;
//!
//! let json = r#"{
//!   "bpm": 120, "key": {"tonic": "C", "mode": "major"}, "mode": "chords",
//!   "segments": [
//!     {"start": 0.0, "end": 1.0, "chord": "C"},
//!     {"start": 1.0, "end": 2.0, "chord": "Am"},
//!     {"start": 2.0, "end": 4.0, "chord": "F"}
//!   ]
//! }"#;
//!
//! let text = render(json)?;
//! assert!(text.contains("C (I)"));
//! # Ok::<(), chordgrid::ChordGridError>(())
//! ```

use crate::analysis::{Analysis, Segments};
use crate::config::DisplayOptions;
use crate::error::ChordGridError;
use crate::measure::{group_into_measures, Measure};
use crate::model::{BassBar, Key, TimeSignature};
use crate::quantize::{BeatSlot, DisplayMode};
use crate::render::render_chart;

/// Grouping tempo for a positive bpm too slow to round to a whole beat
pub const FALLBACK_BPM: u32 = 120;

/// Summary shown above a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHeader {
    /// Tempo rounded to whole beats per minute; `None` when missing or unusable.
    pub bpm: Option<u32>,
    pub key: Option<Key>,
    pub time_signature: TimeSignature,
    /// Number of raw segments in the analysis.
    pub changes: usize,
}

/// What a chart displays
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Measures {
        measures: Vec<Measure>,
        beats_per_measure: usize,
        /// Key the numerals are computed against.
        key: Key,
    },
    Bass(Vec<BassBar>),
}

/// A chart derived from one analysis result
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub header: ChartHeader,
    pub body: ChartBody,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        match &self.body {
            ChartBody::Measures { measures, .. } => measures.is_empty(),
            ChartBody::Bass(bars) => bars.is_empty(),
        }
    }

    /// Beat grids for every measure, in order. Empty for bass charts.
    pub fn beat_grids(&self, display_mode: DisplayMode) -> Vec<Vec<BeatSlot>> {
        match &self.body {
            ChartBody::Measures {
                measures,
                beats_per_measure,
                key,
            } => measures
                .iter()
                .map(|m| m.beat_grid(*beats_per_measure, display_mode, *key))
                .collect(),
            ChartBody::Bass(_) => Vec::new(),
        }
    }
}

/// Build a chart from a parsed analysis.
///
/// Chord analyses are grouped into measures with the tempo rounded to whole
/// bpm, the same figure the header shows. A positive tempo that rounds to 0
/// is grouped at [`FALLBACK_BPM`]. A missing, non-finite or non-positive
/// tempo leaves the chart with no measures.
pub fn build_chart(analysis: &Analysis, options: &DisplayOptions) -> Chart {
    let time_signature = options
        .time_signature
        .unwrap_or_else(|| analysis.time_signature());
    let bpm = rounded_bpm(analysis.bpm);

    let header = ChartHeader {
        bpm,
        key: analysis.key,
        time_signature,
        changes: analysis.segments.len(),
    };

    let body = match &analysis.segments {
        Segments::Bass(bars) => ChartBody::Bass(bars.clone()),
        Segments::Chords(segments) => {
            let measures = match bpm {
                Some(0) => {
                    log::warn!(
                        "tempo {:?} rounds to 0, grouping at {} bpm",
                        analysis.bpm,
                        FALLBACK_BPM
                    );
                    group_into_measures(segments, FALLBACK_BPM as f64, time_signature)
                }
                Some(bpm) => group_into_measures(segments, bpm as f64, time_signature),
                None => {
                    if !segments.is_empty() {
                        log::warn!("unusable tempo {:?}, no measures to show", analysis.bpm);
                    }
                    Vec::new()
                }
            };
            ChartBody::Measures {
                measures,
                beats_per_measure: time_signature.beats_per_measure(),
                key: analysis.key_or_default(),
            }
        }
    };

    Chart { header, body }
}

fn rounded_bpm(bpm: Option<f64>) -> Option<u32> {
    let bpm = bpm?;
    if bpm.is_finite() && bpm > 0.0 && bpm.round() <= u32::MAX as f64 {
        Some(bpm.round() as u32)
    } else {
        None
    }
}

/// Render an analysis JSON document as a text chart with default options.
pub fn render(json: &str) -> Result<String, ChordGridError> {
    render_with_options(json, &DisplayOptions::default())
}

/// Render an analysis JSON document as a text chart.
///
/// # Example
/// ```rust
/// use chordgrid::{render_with_options, DisplayMode, DisplayOptions};
///
/// let json = r#"{"bpm": 60, "key": {"tonic": "G", "mode": "major"},
///               "segments": [{"start": 0.0, "end": 4.0, "chord": "D7"}]}"#;
/// let options = DisplayOptions { display_mode: DisplayMode::Degrees, ..Default::default() };
///
/// let text = render_with_options(json, &options)?;
/// assert!(text.contains("V⁷"));
/// # Ok::<(), chordgrid::ChordGridError>(())
/// ```
pub fn render_with_options(json: &str, options: &DisplayOptions) -> Result<String, ChordGridError> {
    let analysis = Analysis::from_json(json)?;
    let chart = build_chart(&analysis, options);
    Ok(render_chart(&chart, options))
}
