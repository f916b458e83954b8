//! Integration tests for chordgrid
//!
//! Tests the full pipeline from analysis JSON to charts, grids and exports.

use chordgrid::{
    build_chart, export, group_into_measures, render, render_with_options, to_nashville, Analysis,
    BeatSlot, ChartBody, ChordSegment, DisplayMode, DisplayOptions, ExportFormat, Mode,
    PitchClass, Segments, TimeSignature,
};

const SONG: &str = r#"{
  "source": "https://www.youtube.com/watch?v=example",
  "title": null,
  "bpm": 90.2,
  "key": {"tonic": "G", "mode": "major"},
  "time_signature": "4/4",
  "mode": "chords",
  "segments": [
    {"start": 0.52, "end": 2.52, "chord": "G"},
    {"start": 2.52, "end": 3.19, "chord": "Em7"},
    {"start": 3.19, "end": 5.19, "chord": "Cmaj7"},
    {"start": 5.19, "end": 5.9, "chord": "D"},
    {"start": 5.9, "end": 8.6, "chord": "N"},
    {"start": 8.6, "end": 10.52, "chord": "Bbdim"}
  ]
}"#;

fn chord_segments(analysis: &Analysis) -> Vec<ChordSegment> {
    match &analysis.segments {
        Segments::Chords(segments) => segments.clone(),
        Segments::Bass(_) => panic!("expected chord segments"),
    }
}

#[test]
fn test_song_groups_into_measures() {
    // 90 bpm in 4/4: 2.666.. seconds per measure, anchored at 0.52
    let analysis = Analysis::from_json(SONG).unwrap();
    let chart = build_chart(&analysis, &DisplayOptions::default());

    let ChartBody::Measures { measures, beats_per_measure, .. } = &chart.body else {
        panic!("expected measures");
    };
    assert_eq!(*beats_per_measure, 4);

    let chords: Vec<Vec<&str>> = measures
        .iter()
        .map(|m| m.segments().iter().map(|s| s.chord.as_str()).collect())
        .collect();
    assert_eq!(
        chords,
        vec![vec!["G", "Em7"], vec!["Cmaj7", "D"], vec!["N"], vec!["Bbdim"]]
    );

    // Nothing dropped, duplicated or reordered
    let flattened: Vec<ChordSegment> = measures
        .iter()
        .flat_map(|m| m.segments().iter().cloned())
        .collect();
    assert_eq!(flattened, chord_segments(&analysis));
}

#[test]
fn test_song_beat_grids() {
    let analysis = Analysis::from_json(SONG).unwrap();
    let chart = build_chart(&analysis, &DisplayOptions::default());
    let grids = chart.beat_grids(DisplayMode::Both);

    // Measure 2 spans 3.19-5.9, so D at 5.19 falls on the third beat
    assert_eq!(
        grids[1],
        vec![
            BeatSlot::Chord { label: "CM7".to_string(), degree: Some("IV⁷".to_string()) },
            BeatSlot::Rest,
            BeatSlot::Chord { label: "D".to_string(), degree: Some("V".to_string()) },
            BeatSlot::Rest,
        ]
    );
    assert_eq!(
        grids[2][0],
        BeatSlot::Chord { label: "N".to_string(), degree: Some("—".to_string()) }
    );
    assert_eq!(
        grids[3][0],
        BeatSlot::Chord { label: "Bbdim".to_string(), degree: Some("♭iii".to_string()) }
    );
}

#[test]
fn test_render_song() {
    let text = render(SONG).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Chord Changes");
    assert_eq!(lines[1], "BPM: 90  Key: G major  Time: 4/4  Changes: 6");
    assert_eq!(lines.len(), 6);
    assert!(lines[2].starts_with("  1 | G (I)"));
    assert!(lines[3].contains("CM7 (IV⁷)"));
    assert!(lines[5].starts_with("  4 | Bbdim (♭iii)"));
}

#[test]
fn test_render_degrees_with_timestamps() {
    let options = DisplayOptions {
        display_mode: DisplayMode::Degrees,
        show_timestamps: true,
        time_signature: None,
    };
    let text = render_with_options(SONG, &options).unwrap();
    assert!(text.contains("@ 0.5s"));
    assert!(text.contains("vi⁷"));
    assert!(!text.contains("Em7"));
}

#[test]
fn test_config_file_drives_render() {
    let options = DisplayOptions::from_yaml("display-mode: chords\ntime-signature: 3/4\n").unwrap();
    let text = render_with_options(SONG, &options).unwrap();
    assert!(text.contains("Time: 3/4"));
    assert!(!text.contains("(I)"));
}

#[test]
fn test_exports() {
    let analysis = Analysis::from_json(SONG).unwrap();

    let csv = export(&analysis, ExportFormat::Csv).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows[0], "bar,start,end,chord");
    assert_eq!(rows[1], "1,0.52,2.52,G");
    assert_eq!(rows.len(), 7);

    let pro = export(&analysis, ExportFormat::ChordPro).unwrap();
    assert_eq!(pro.lines().count(), 5);
    assert!(pro.starts_with("[G]  # 0.52s → 2.52s"));
    assert!(!pro.contains("[N]"));

    let json = export(&analysis, ExportFormat::Json).unwrap();
    let echoed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(echoed, analysis.raw);
}

#[test]
fn test_bass_analysis_passes_through() {
    let json = r#"{
      "bpm": 128.0, "key": null, "time_signature": "4/4", "mode": "bass",
      "segments": [
        {"start": 0.0, "end": 1.87, "notes": [], "tabs": [{"display": "E3"}, {"display": "E3"}, {"display": "G5"}, {"display": "A0"}]},
        {"start": 1.87, "end": 3.75, "notes": [], "tabs": [{"display": "D2"}]}
      ]
    }"#;
    let text = render(json).unwrap();
    assert!(text.starts_with("Bass Tablature\nBPM: 128  Key: —"));
    assert!(text.contains("Bar 2  1.87s → 3.75s\n  D2\n"));

    let analysis = Analysis::from_json(json).unwrap();
    assert!(export(&analysis, ExportFormat::ChordPro).is_err());
    assert!(export(&analysis, ExportFormat::Csv).is_ok());
}

#[test]
fn test_nashville_reference_values() {
    let c = PitchClass::C;
    assert_eq!(to_nashville("C", c, Mode::Major), "I");
    assert_eq!(to_nashville("G", c, Mode::Major), "V");
    assert_eq!(to_nashville("Am", c, Mode::Major), "vi");
    assert_eq!(to_nashville("F#dim", c, Mode::Major), "♭v");
    assert_eq!(to_nashville("Cmaj7", c, Mode::Major), "I⁷");
    assert_eq!(to_nashville("Dm7", c, Mode::Major), "ii⁷");
    assert_eq!(to_nashville("N", c, Mode::Minor), "—");
    assert_eq!(to_nashville("", c, Mode::Minor), "—");
}

#[test]
fn test_every_time_signature_grid_length() {
    let segments: Vec<ChordSegment> = (0..40)
        .map(|i| ChordSegment::new(i as f64 * 0.45, (i + 1) as f64 * 0.45, "A"))
        .collect();
    for ts in [TimeSignature::FourFour, TimeSignature::ThreeFour, TimeSignature::SixEight] {
        let beats = ts.beats_per_measure();
        let measures = group_into_measures(&segments, 140.0, ts);
        assert!(!measures.is_empty());
        for m in &measures {
            assert!(!m.segments().is_empty());
            assert_eq!(m.beat_grid(beats, DisplayMode::Both, Default::default()).len(), beats);
        }
    }
}
