use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use chordgrid::{
    build_chart, export, render_chart, Analysis, ChordGridError, DisplayMode, DisplayOptions,
    ExportFormat, TimeSignature,
};
use clap::Parser;

/// Bar-aligned chord charts with Nashville numbers.
#[derive(Parser, Debug)]
#[command(name = "chordgrid")]
#[command(about = "Render a chord analysis as a bar-aligned chart or export it")]
struct Args {
    /// Analysis result JSON file, or `-` for stdin
    input: String,

    /// What each beat shows: chords, degrees or both
    #[arg(short, long, value_parser = parse_display_mode)]
    display: Option<DisplayMode>,

    /// Show each measure's start time
    #[arg(short, long)]
    timestamps: bool,

    /// Override the analysis's time signature (4/4, 3/4 or 6/8)
    #[arg(long, value_parser = parse_time_signature)]
    time_signature: Option<TimeSignature>,

    /// YAML display configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export instead of rendering: json, csv or chordpro
    #[arg(short, long, value_parser = parse_export_format)]
    export: Option<ExportFormat>,

    /// Write output to this file instead of stdout. Exports default to
    /// chords.json, chords.csv or chords.pro
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_display_mode(s: &str) -> Result<DisplayMode, String> {
    DisplayMode::from_str(s).ok_or_else(|| format!("Invalid display mode: {}", s))
}

fn parse_time_signature(s: &str) -> Result<TimeSignature, String> {
    TimeSignature::from_str(s).ok_or_else(|| format!("Invalid time signature: {}", s))
}

fn parse_export_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_str(s).ok_or_else(|| format!("Invalid export format: {}", s))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ChordGridError> {
    let mut options = match &args.config {
        Some(path) => DisplayOptions::load(path)?,
        None => DisplayOptions::default(),
    };
    if let Some(mode) = args.display {
        options.display_mode = mode;
    }
    if args.timestamps {
        options.show_timestamps = true;
    }
    if args.time_signature.is_some() {
        options.time_signature = args.time_signature;
    }

    let source = read_input(&args.input)?;
    let analysis = Analysis::from_json(&source)?;

    let text = match args.export {
        Some(format) => {
            let mut text = export(&analysis, format)?;
            text.push('\n');
            text
        }
        None => render_chart(&build_chart(&analysis, &options), &options),
    };

    match output_path(args.output, args.export) {
        Some(path) => {
            fs::write(&path, &text)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Where to write: `--output` if given, else the export format's default file.
fn output_path(output: Option<PathBuf>, export: Option<ExportFormat>) -> Option<PathBuf> {
    output.or_else(|| export.map(|format| PathBuf::from(format.file_name())))
}

fn read_input(input: &str) -> Result<String, ChordGridError> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}
