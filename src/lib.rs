//! Decode extracted acquisition data files, align a timestamp stream with a
//! raw spike-band stream, and cut normalized segments for audio/video sync.
//!
//! Pipeline: [`trodes::read_data_file`] → [`align::align_streams`] →
//! [`align::select_channel`] → [`align::extract_segment`] → [`export`].

pub mod align;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod trodes;

pub use error::{Result, SyncError};
