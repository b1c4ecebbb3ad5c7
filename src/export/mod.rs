//! Hand-off artefacts for the video muxer and spreadsheet tools.

pub mod audio;
pub mod report;
pub mod samples;

pub use audio::write_segment_wav;
pub use report::SegmentReport;
pub use samples::{write_segment_csv, write_segment_csv_file};
