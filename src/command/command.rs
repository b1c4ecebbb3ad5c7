use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "spikesync",
    version,
    about = "Align extracted spike-band recordings and cut segments for video sync",
    long_about = "Decodes extracted acquisition data files (timestamps and raw samples),\n\
                  aligns them by position and exports a normalized audio segment,\n\
                  a per-sample CSV and a JSON report for a given time window."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the settings, record layout and record count of a data file
    Inspect(InspectArgs),
    /// Align timestamp and raw-data files and export a time window
    Align(AlignArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// Data file to inspect
    pub file: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AlignArgs {
    /// Timestamp data file
    #[arg(long)]
    pub timestamps: PathBuf,

    /// Raw spike-band data file
    #[arg(long)]
    pub rawdata: PathBuf,

    /// Window start (HH:MM:SS or seconds)
    #[arg(long)]
    pub start: String,

    /// Window end (HH:MM:SS or seconds)
    #[arg(long)]
    pub end: String,

    /// Samples per second [default: $SPIKESYNC_SAMPLE_RATE or 30000]
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Video frame rate [default: $SPIKESYNC_VIDEO_FPS or 30]
    #[arg(long)]
    pub fps: Option<f64>,

    /// Stream length difference tolerated before warning about truncation
    #[arg(long)]
    pub tolerance: Option<usize>,

    /// Output directory [default: $SPIKESYNC_OUTPUT_DIR or exports]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// File stem for the exported files
    #[arg(long, default_value = "segment")]
    pub name: String,
}
