//! # Analysis Result Parsing
//!
//! Turns the JSON document produced by the audio-analysis backend into an
//! [`Analysis`].
//!
//! ## Input Shape
//! ```text
//! { "bpm": 120.3,
//!   "key": { "tonic": "A", "mode": "minor" } | null,
//!   "time_signature": "4/4",              (optional)
//!   "mode": "chords" | "bass",            (optional, default chords)
//!   "segments": [ { "start", "end", "chord" } ]            chords mode
//!             | [ { "start", "end", "tabs": [{ "display" }] } ]  bass mode
//! }
//! ```
//!
//! Unknown fields (`source`, `title`, per-note pitch data, ...) are ignored by the
//! typed view but kept in [`Analysis::raw`] so the JSON export can echo the
//! document verbatim.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ChordGridError;
use crate::model::{AnalysisMode, BassBar, ChordSegment, Key, Mode, PitchClass, TimeSignature};

/// Segments of an analysis, shaped by its mode
#[derive(Debug, Clone, PartialEq)]
pub enum Segments {
    Chords(Vec<ChordSegment>),
    Bass(Vec<BassBar>),
}

impl Segments {
    pub fn len(&self) -> usize {
        match self {
            Segments::Chords(segments) => segments.len(),
            Segments::Bass(bars) => bars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed analysis result
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The document exactly as received.
    pub raw: Value,
    pub bpm: Option<f64>,
    pub key: Option<Key>,
    /// Time signature as sent; see [`Analysis::time_signature`].
    pub time_signature: Option<String>,
    pub mode: AnalysisMode,
    pub segments: Segments,
}

/// Raw analysis for JSON deserialization
#[derive(Deserialize, Debug)]
struct RawAnalysis {
    #[serde(default)]
    bpm: Option<f64>,
    #[serde(default)]
    key: Option<RawKey>,
    #[serde(default)]
    time_signature: Option<String>,
    #[serde(default)]
    mode: AnalysisMode,
    #[serde(default)]
    segments: Option<Vec<Value>>,
}

#[derive(Deserialize, Debug)]
struct RawKey {
    tonic: String,
    #[serde(default)]
    mode: Mode,
}

impl Analysis {
    /// Parse an analysis result from JSON text.
    ///
    /// # Example
    /// ```
    /// use chordgrid::{Analysis, AnalysisMode};
    ///
    /// let json = r#"{"bpm": 120, "key": {"tonic": "C", "mode": "major"},
    ///               "mode": "chords",
    ///               "segments": [{"start": 0.0, "end": 2.0, "chord": "C"}]}"#;
    /// let analysis = Analysis::from_json(json)?;
    /// assert_eq!(analysis.mode, AnalysisMode::Chords);
    /// assert_eq!(analysis.segments.len(), 1);
    /// # Ok::<(), chordgrid::ChordGridError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ChordGridError> {
        let raw: Value = serde_json::from_str(json)?;
        Self::from_value(raw)
    }

    /// Parse an analysis result from an already-decoded JSON value.
    pub fn from_value(raw: Value) -> Result<Self, ChordGridError> {
        if !raw.is_object() {
            return Err(ChordGridError::InvalidAnalysis(
                "expected a JSON object at the top level".to_string(),
            ));
        }
        let parsed: RawAnalysis = serde_json::from_value(raw.clone())?;

        let key = parsed.key.map(parse_key).transpose()?;

        let values = parsed.segments.unwrap_or_default();
        let segments = match parsed.mode {
            AnalysisMode::Chords => Segments::Chords(parse_segments(values)?),
            AnalysisMode::Bass => Segments::Bass(parse_segments(values)?),
        };

        log::debug!(
            "parsed {} analysis with {} segments",
            parsed.mode,
            segments.len()
        );

        Ok(Self {
            raw,
            bpm: parsed.bpm,
            key,
            time_signature: parsed.time_signature,
            mode: parsed.mode,
            segments,
        })
    }

    /// The analysis's time signature, with unrecognised or missing values read as 4/4.
    pub fn time_signature(&self) -> TimeSignature {
        if let Some(ts) = self.time_signature.as_deref() {
            if TimeSignature::from_str(ts).is_none() {
                log::warn!("unsupported time signature {:?}, using 4/4", ts);
            }
        }
        TimeSignature::parse_or_default(self.time_signature.as_deref())
    }

    /// The key used for numbering chords: the detected one, or C major.
    pub fn key_or_default(&self) -> Key {
        self.key.unwrap_or_default()
    }
}

fn parse_key(raw: RawKey) -> Result<Key, ChordGridError> {
    let tonic = PitchClass::from_spelling(raw.tonic.trim()).ok_or_else(|| {
        ChordGridError::InvalidAnalysis(format!("unknown key tonic: {:?}", raw.tonic))
    })?;
    Ok(Key::new(tonic, raw.mode))
}

fn parse_segments<T>(values: Vec<Value>) -> Result<Vec<T>, ChordGridError>
where
    T: for<'de> Deserialize<'de>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value).map_err(|e| {
                ChordGridError::InvalidAnalysis(format!("segment {}: {}", i + 1, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords_analysis() {
        let json = r#"{
            "source": "https://example.com/watch?v=abc",
            "title": null,
            "bpm": 98.6,
            "key": {"tonic": "G", "mode": "major"},
            "time_signature": "3/4",
            "mode": "chords",
            "segments": [
                {"start": 0.0, "end": 1.5, "chord": "G"},
                {"start": 1.5, "end": 3.0, "chord": "Em7"}
            ]
        }"#;
        let analysis = Analysis::from_json(json).unwrap();
        assert_eq!(analysis.bpm, Some(98.6));
        assert_eq!(analysis.key, Some(Key::new(PitchClass::new(7), Mode::Major)));
        assert_eq!(analysis.time_signature(), TimeSignature::ThreeFour);
        match analysis.segments {
            Segments::Chords(segments) => {
                assert_eq!(segments.len(), 2);
                assert_eq!(segments[1], ChordSegment::new(1.5, 3.0, "Em7"));
            }
            Segments::Bass(_) => panic!("expected chord segments"),
        }
    }

    #[test]
    fn test_parse_bass_analysis() {
        let json = r#"{
            "bpm": 110.0,
            "key": null,
            "mode": "bass",
            "segments": [
                {"start": 0.5, "end": 2.7, "notes": [], "tabs": [
                    {"string": 3, "fret": 0, "display": "A0"},
                    {"string": 0, "fret": -1, "display": "—"}
                ]}
            ]
        }"#;
        let analysis = Analysis::from_json(json).unwrap();
        assert_eq!(analysis.mode, AnalysisMode::Bass);
        assert_eq!(analysis.key, None);
        assert_eq!(analysis.key_or_default(), Key::default());
        match analysis.segments {
            Segments::Bass(bars) => {
                assert_eq!(bars[0].tabs.len(), 2);
                assert_eq!(bars[0].tabs[0].display, "A0");
            }
            Segments::Chords(_) => panic!("expected bass bars"),
        }
    }

    #[test]
    fn test_mode_defaults_to_chords() {
        let analysis = Analysis::from_json(r#"{"bpm": 120, "segments": []}"#).unwrap();
        assert_eq!(analysis.mode, AnalysisMode::Chords);
        assert!(analysis.segments.is_empty());
        assert_eq!(analysis.time_signature(), TimeSignature::FourFour);
    }

    #[test]
    fn test_null_segments_are_empty() {
        for mode in ["chords", "bass"] {
            let json = format!(r#"{{"bpm": 120, "mode": "{}", "segments": null}}"#, mode);
            let analysis = Analysis::from_json(&json).unwrap();
            assert!(analysis.segments.is_empty());
        }
    }

    #[test]
    fn test_flat_tonic_normalizes() {
        let json = r#"{"bpm": 120, "key": {"tonic": "Bb", "mode": "minor"}, "segments": []}"#;
        let analysis = Analysis::from_json(json).unwrap();
        let key = analysis.key.unwrap();
        assert_eq!(key.tonic.name(), "A#");
        assert_eq!(key.mode, Mode::Minor);
    }

    #[test]
    fn test_unknown_tonic_is_rejected() {
        let json = r#"{"bpm": 120, "key": {"tonic": "H", "mode": "major"}, "segments": []}"#;
        let err = Analysis::from_json(json).unwrap_err();
        assert!(matches!(err, ChordGridError::InvalidAnalysis(_)));
    }

    #[test]
    fn test_chord_segment_without_chord_is_rejected() {
        let json = r#"{"bpm": 120, "mode": "chords", "segments": [
            {"start": 0.0, "end": 1.0, "chord": "C"},
            {"start": 1.0, "end": 2.0}
        ]}"#;
        let err = Analysis::from_json(json).unwrap_err();
        assert!(err.to_string().contains("segment 2"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = Analysis::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ChordGridError::InvalidAnalysis(_)));
    }

    #[test]
    fn test_raw_document_is_kept() {
        let json = r#"{"bpm": 120, "title": "Song", "segments": []}"#;
        let analysis = Analysis::from_json(json).unwrap();
        assert_eq!(analysis.raw["title"], "Song");
    }
}
