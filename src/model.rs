//! # Data Model
//!
//! Plain value types shared by the whole pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! Analysis (see `analysis`)
//!   ├── key: Option<Key>
//!   │     ├── tonic: PitchClass (C..B, sharp spelling)
//!   │     └── mode: Mode (major | minor)
//!   ├── time_signature -> TimeSignature (4/4 | 3/4 | 6/8)
//!   └── segments
//!         ├── Chords(Vec<ChordSegment>)   start, end, chord label
//!         └── Bass(Vec<BassBar>)          start, end, tabs
//! ```
//!
//! ## Pitch Classes
//! Pitch classes are indexed with the fixed ordering
//! `C C# D D# E F F# G G# A A# B` (0-11). Only single-accidental spellings are
//! recognised, through a closed lookup table: `Db Eb Gb Ab Bb` map onto their
//! sharp equivalents, while spellings like `Cb` or `E#` are not pitch classes here.

use serde::Deserialize;
use std::fmt;

/// Sharp spellings in pitch-class order.
pub const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// No-chord sentinel emitted by the chord detector.
pub const NO_CHORD: &str = "N";

/// A detected chord over a time span, in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChordSegment {
    pub start: f64,
    pub end: f64,
    pub chord: String,
}

impl ChordSegment {
    pub fn new(start: f64, end: f64, chord: impl Into<String>) -> Self {
        Self {
            start,
            end,
            chord: chord.into(),
        }
    }

    pub fn is_no_chord(&self) -> bool {
        self.chord == NO_CHORD
    }
}

/// One fretted bass note, already formatted by the analysis backend (e.g. `"A5"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TabNote {
    pub display: String,
}

/// A bar of bass tablature. Passed through to display unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BassBar {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub tabs: Vec<TabNote>,
}

/// Time signature (4/4, 3/4 or 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSignature {
    #[default]
    FourFour,
    ThreeFour,
    SixEight,
}

impl TimeSignature {
    /// Recognise one of the supported signatures.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "4/4" => Some(Self::FourFour),
            "3/4" => Some(Self::ThreeFour),
            "6/8" => Some(Self::SixEight),
            _ => None,
        }
    }

    /// Like [`TimeSignature::from_str`], but anything unrecognised becomes 4/4.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::from_str).unwrap_or_default()
    }

    pub fn beats_per_measure(self) -> usize {
        match self {
            Self::FourFour => 4,
            Self::ThreeFour => 3,
            Self::SixEight => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FourFour => "4/4",
            Self::ThreeFour => "3/4",
            Self::SixEight => "6/8",
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pitch class in 12-TET, 0 = C through 11 = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build from an index, wrapping into 0..12.
    pub fn new(index: i32) -> Self {
        PitchClass(index.rem_euclid(12) as u8)
    }

    /// Look up a root spelling: a letter A-G plus at most one `#` or `b`.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        let sharp = match spelling {
            "Db" => "C#",
            "Eb" => "D#",
            "Gb" => "F#",
            "Ab" => "G#",
            "Bb" => "A#",
            other => other,
        };
        PITCH_NAMES
            .iter()
            .position(|name| *name == sharp)
            .map(|idx| PitchClass(idx as u8))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        PITCH_NAMES[self.0 as usize]
    }

    /// Semitones from `tonic` up to `self`.
    pub fn interval_from(self, tonic: PitchClass) -> u8 {
        (self.0 + 12 - tonic.0) % 12
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode of the detected key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => f.write_str("major"),
            Mode::Minor => f.write_str("minor"),
        }
    }
}

/// Detected key. Charts without one are numbered against C major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Key {
    pub tonic: PitchClass,
    pub mode: Mode,
}

impl Key {
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        Self { tonic, mode }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

/// Which kind of segments the backend produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Chords,
    Bass,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Chords => f.write_str("chords"),
            AnalysisMode::Bass => f.write_str("bass"),
        }
    }
}
