//! Plain-text chart rendering.
//!
//! ```text
//! Chord Changes
//! BPM: 120  Key: C major  Time: 4/4  Changes: 5
//!   1 | C (I)   ·       Am (vi) ·       |
//!   2 | F (IV)  ·       G⁷ ...
//! ```
//!
//! Every slot in a chord chart is padded to the same width so beats line up
//! across measures. Bass charts list each bar with its time range and tabs.

use crate::api::{Chart, ChartBody};
use crate::config::DisplayOptions;
use crate::model::BassBar;
use crate::nashville::NO_CHORD_GLYPH;
use crate::quantize::{BeatSlot, DisplayMode};

const REST_GLYPH: &str = "·";
const NO_DATA: &str = "no data";

/// Render a chart as text.
pub fn render_chart(chart: &Chart, options: &DisplayOptions) -> String {
    let mut out = String::new();

    let title = match chart.body {
        ChartBody::Measures { .. } => "Chord Changes",
        ChartBody::Bass(_) => "Bass Tablature",
    };
    out.push_str(title);
    out.push('\n');
    out.push_str(&header_line(chart));
    out.push('\n');

    if chart.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
        return out;
    }

    match &chart.body {
        ChartBody::Measures { measures, .. } => {
            let grids = chart.beat_grids(options.display_mode);
            let cells: Vec<Vec<String>> = grids
                .iter()
                .map(|grid| {
                    grid.iter()
                        .map(|slot| slot_text(slot, options.display_mode))
                        .collect()
                })
                .collect();
            let width = cells
                .iter()
                .flatten()
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(1);

            for (i, (measure, row)) in measures.iter().zip(&cells).enumerate() {
                let padded: Vec<String> = row
                    .iter()
                    .map(|cell| format!("{:<width$}", cell, width = width))
                    .collect();
                out.push_str(&format!("{:>3} | {} |", i + 1, padded.join(" ")));
                if options.show_timestamps {
                    out.push_str(&format!(" @ {}s", format_seconds(measure.start(), 1)));
                }
                out.push('\n');
            }
        }
        ChartBody::Bass(bars) => {
            for (i, bar) in bars.iter().enumerate() {
                out.push_str(&bass_bar_text(i, bar));
            }
        }
    }
    out
}

fn header_line(chart: &Chart) -> String {
    let header = &chart.header;
    let bpm = header
        .bpm
        .map_or_else(|| NO_CHORD_GLYPH.to_string(), |bpm| bpm.to_string());
    let key = header
        .key
        .map_or_else(|| NO_CHORD_GLYPH.to_string(), |key| key.to_string());
    format!(
        "BPM: {}  Key: {}  Time: {}  Changes: {}",
        bpm, key, header.time_signature, header.changes
    )
}

fn slot_text(slot: &BeatSlot, display_mode: DisplayMode) -> String {
    match slot {
        BeatSlot::Rest => REST_GLYPH.to_string(),
        BeatSlot::Chord { label, degree } => match (display_mode, degree) {
            (DisplayMode::Chords, _) | (_, None) => label.clone(),
            (DisplayMode::Degrees, Some(degree)) => degree.clone(),
            (DisplayMode::Both, Some(degree)) => format!("{} ({})", label, degree),
        },
    }
}

fn bass_bar_text(index: usize, bar: &BassBar) -> String {
    let tabs: Vec<&str> = bar.tabs.iter().map(|t| t.display.as_str()).collect();
    format!(
        "Bar {}  {}s → {}s\n  {}\n",
        index + 1,
        format_seconds(bar.start, 2),
        format_seconds(bar.end, 2),
        tabs.join(" ")
    )
}

/// Seconds with `places` decimals, ties rounded away from zero (`0.125` → `0.13`).
pub(crate) fn format_seconds(seconds: f64, places: u32) -> String {
    let scale = 10f64.powi(places as i32);
    format!("{:.*}", places as usize, (seconds * scale).round() / scale)
}
