pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod measure;
pub mod model;
pub mod nashville;
pub mod quantize;
pub mod render;

pub use analysis::{Analysis, Segments};
pub use api::{
    build_chart, render, render_with_options, Chart, ChartBody, ChartHeader, FALLBACK_BPM,
};
pub use config::DisplayOptions;
pub use error::*;
pub use export::{export, ExportFormat};
pub use measure::{group_into_measures, Measure};
pub use model::*;
pub use nashville::to_nashville;
pub use quantize::{format_chord_label, quantize, BeatSlot, DisplayMode};
pub use render::render_chart;
