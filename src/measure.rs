//! # Measure Grouping
//!
//! Groups a stream of chord segments into measures using the tempo and time
//! signature.
//!
//! ## Algorithm
//! - `seconds_per_measure = 60 / bpm * beats_per_measure`
//! - The first window is `[first.start, first.start + seconds_per_measure)`
//! - A segment joins the open window when it starts before the window's end
//! - Otherwise the open window is emitted and the next one starts exactly at the
//!   previous window's end, so the grid stays phase-locked to the first segment
//!
//! The window only ever advances one measure per overflow. A segment that starts
//! several measures after the previous one therefore lands in the very next
//! window, which is stretched rather than preceded by empty measures.
//!
//! Segments are expected in non-decreasing start order. This is not checked;
//! unordered input still groups without panicking but the result is meaningless.

use crate::model::{ChordSegment, Key, TimeSignature};
use crate::quantize::{quantize, BeatSlot, DisplayMode};

/// A run of consecutive segments forming one bar. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    segments: Vec<ChordSegment>,
}

impl Measure {
    /// Returns `None` for an empty segment list.
    pub fn new(segments: Vec<ChordSegment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[ChordSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<ChordSegment> {
        self.segments
    }

    /// Start of the first segment.
    pub fn start(&self) -> f64 {
        self.segments[0].start
    }

    /// End of the last segment.
    pub fn end(&self) -> f64 {
        self.segments[self.segments.len() - 1].end
    }

    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Quantize this measure onto a beat grid. See [`quantize`].
    pub fn beat_grid(
        &self,
        beats_per_measure: usize,
        display_mode: DisplayMode,
        key: Key,
    ) -> Vec<BeatSlot> {
        quantize(self, beats_per_measure, display_mode, key)
    }
}

/// Group ordered chord segments into measures.
///
/// `bpm` must be positive; callers reject other values before grouping.
///
/// # Example
/// ```
/// use chordgrid::{group_into_measures, ChordSegment, TimeSignature};
///
/// // 120 bpm in 4/4: two seconds per measure
/// let segments = vec![
///     ChordSegment::new(0.0, 1.0, "C"),
///     ChordSegment::new(1.0, 2.0, "F"),
///     ChordSegment::new(2.0, 4.0, "G"),
/// ];
/// let measures = group_into_measures(&segments, 120.0, TimeSignature::FourFour);
/// assert_eq!(measures.len(), 2);
/// assert_eq!(measures[0].segments().len(), 2);
/// ```
pub fn group_into_measures(
    segments: &[ChordSegment],
    bpm: f64,
    time_signature: TimeSignature,
) -> Vec<Measure> {
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let seconds_per_beat = 60.0 / bpm;
    let seconds_per_measure = seconds_per_beat * time_signature.beats_per_measure() as f64;

    let mut measures = Vec::new();
    let mut current: Vec<ChordSegment> = Vec::new();
    let mut measure_end = first.start + seconds_per_measure;

    for segment in segments {
        if segment.start < measure_end {
            current.push(segment.clone());
        } else {
            measures.extend(Measure::new(std::mem::take(&mut current)));
            current.push(segment.clone());
            measure_end += seconds_per_measure;
        }
    }
    measures.extend(Measure::new(current));

    log::debug!(
        "grouped {} segments into {} measures ({} at {} bpm)",
        segments.len(),
        measures.len(),
        time_signature,
        bpm
    );
    measures
}
