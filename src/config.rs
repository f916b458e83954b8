//! # Display Configuration
//!
//! Display settings for rendering a chart, optionally loaded from YAML:
//!
//! ```yaml
//! display-mode: degrees     # chords | degrees | both
//! show-timestamps: true
//! time-signature: "3/4"     # overrides the analysis's time signature
//! ```
//!
//! Settings are plain values passed into each render call; nothing is global.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ChordGridError;
use crate::model::TimeSignature;
use crate::quantize::DisplayMode;

/// Settings that shape a rendered chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayOptions {
    pub display_mode: DisplayMode,
    pub show_timestamps: bool,
    /// Used instead of the analysis's own time signature when set.
    pub time_signature: Option<TimeSignature>,
}

/// Raw options for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawDisplayOptions {
    display_mode: Option<DisplayMode>,
    show_timestamps: Option<bool>,
    time_signature: Option<String>,
}

impl DisplayOptions {
    /// Parse options from YAML text. Missing fields keep their defaults.
    ///
    /// # Example
    /// ```
    /// use chordgrid::{DisplayMode, DisplayOptions};
    ///
    /// let options = DisplayOptions::from_yaml("display-mode: chords\nshow-timestamps: true")?;
    /// assert_eq!(options.display_mode, DisplayMode::Chords);
    /// assert!(options.show_timestamps);
    /// # Ok::<(), chordgrid::ChordGridError>(())
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, ChordGridError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawDisplayOptions =
            serde_yaml::from_str(content).map_err(|e| ChordGridError::Config(e.to_string()))?;

        let time_signature = match raw.time_signature.as_deref() {
            Some(ts) => Some(TimeSignature::from_str(ts).ok_or_else(|| {
                ChordGridError::Config(format!(
                    "time-signature must be 4/4, 3/4 or 6/8, got {:?}",
                    ts
                ))
            })?),
            None => None,
        };

        Ok(Self {
            display_mode: raw.display_mode.unwrap_or_default(),
            show_timestamps: raw.show_timestamps.unwrap_or(false),
            time_signature,
        })
    }

    /// Read and parse a YAML options file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChordGridError> {
        let path = path.as_ref();
        log::debug!("loading display options from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
