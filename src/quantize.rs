//! # Beat Quantization
//!
//! Snaps the chords of one measure onto a fixed grid of beats.
//!
//! ## Algorithm
//! - The measure spans from its first segment's start to its last segment's end
//! - That span is divided into `beats_per_measure` equal beats
//! - Each segment lands on `floor((start - measure_start) / beat_duration)`
//! - When two segments land on the same beat, the later one wins
//! - Beats nobody lands on stay [`BeatSlot::Rest`]
//!
//! The grid always has exactly `beats_per_measure` slots. A measure with no
//! positive duration (e.g. one zero-length segment) yields a grid of rests.

use serde::Deserialize;
use std::fmt;

use crate::measure::Measure;
use crate::model::Key;
use crate::nashville::to_nashville;

/// What each chord slot should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Chord names only
    Chords,
    /// Nashville numbers only
    Degrees,
    /// Chord name with its Nashville number
    #[default]
    Both,
}

impl DisplayMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "chords" => Some(Self::Chords),
            "degrees" => Some(Self::Degrees),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn shows_degrees(self) -> bool {
        matches!(self, Self::Degrees | Self::Both)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chords => f.write_str("chords"),
            Self::Degrees => f.write_str("degrees"),
            Self::Both => f.write_str("both"),
        }
    }
}

/// One beat of a measure's grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeatSlot {
    Rest,
    Chord {
        /// Display label (`maj` shortened to `M`)
        label: String,
        /// Nashville number, when the display mode shows degrees
        degree: Option<String>,
    },
}

impl BeatSlot {
    pub fn is_rest(&self) -> bool {
        matches!(self, BeatSlot::Rest)
    }
}

/// Shorten `maj` to `M` for display, e.g. `Cmaj7` → `CM7`.
///
/// Only the displayed label changes; numerals are always computed from the
/// label as detected.
pub fn format_chord_label(chord_label: &str) -> String {
    chord_label.replace("maj", "M")
}

/// Quantize a measure onto a grid of `beats_per_measure` slots.
///
/// # Example
/// ```
/// use chordgrid::{quantize, BeatSlot, ChordSegment, DisplayMode, Key, Measure};
///
/// let measure = Measure::new(vec![
///     ChordSegment::new(0.0, 1.0, "Cmaj7"),
///     ChordSegment::new(1.0, 2.0, "G"),
/// ]).unwrap();
/// let grid = quantize(&measure, 4, DisplayMode::Both, Key::default());
///
/// assert_eq!(grid.len(), 4);
/// assert_eq!(grid[0], BeatSlot::Chord { label: "CM7".into(), degree: Some("I⁷".into()) });
/// assert_eq!(grid[1], BeatSlot::Rest);
/// assert_eq!(grid[2], BeatSlot::Chord { label: "G".into(), degree: Some("V".into()) });
/// ```
pub fn quantize(
    measure: &Measure,
    beats_per_measure: usize,
    display_mode: DisplayMode,
    key: Key,
) -> Vec<BeatSlot> {
    let mut slots = vec![BeatSlot::Rest; beats_per_measure];

    let measure_start = measure.start();
    let measure_duration = measure.duration();
    // Also catches NaN
    if !(measure_duration > 0.0) || beats_per_measure == 0 {
        return slots;
    }
    let beat_duration = measure_duration / beats_per_measure as f64;

    for segment in measure.segments() {
        let beat = ((segment.start - measure_start) / beat_duration).floor();
        if !(beat >= 0.0 && beat < beats_per_measure as f64) {
            continue;
        }

        let degree = display_mode
            .shows_degrees()
            .then(|| to_nashville(&segment.chord, key.tonic, key.mode));
        slots[beat as usize] = BeatSlot::Chord {
            label: format_chord_label(&segment.chord),
            degree,
        };
    }
    slots
}
