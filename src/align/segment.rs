//! Time-windowed segment extraction.
//!
//! A window is mapped to sample indices with a fixed sample rate, the chosen
//! channel is sliced, and the slice is peak-normalized to [-1.0, 1.0].

use super::table::AlignedTable;
use super::window::TimeWindow;
use crate::error::{Result, SyncError};
use crate::trodes::Column;
use serde::Serialize;
use tracing::info;

/// A normalized slice of the voltage channel
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Name of the column the samples came from
    pub channel: String,
    /// Samples scaled so the largest magnitude is 1.0
    pub values: Vec<f32>,
    /// First sample index (inclusive)
    pub start_sample: usize,
    /// Last sample index (exclusive)
    pub end_sample: usize,
    pub sample_rate: u32,
}

impl Segment {
    pub fn total_samples(&self) -> usize {
        self.end_sample - self.start_sample
    }

    pub fn duration_secs(&self) -> f64 {
        self.total_samples() as f64 / self.sample_rate as f64
    }

    /// Split the samples into consecutive per-video-frame chunks.
    ///
    /// Each chunk holds `floor(sample_rate / fps)` samples; the last one may be shorter.
    pub fn frame_chunks(&self, fps: f64) -> Result<std::slice::Chunks<'_, f32>> {
        let per_frame = samples_per_frame(self.sample_rate, fps)? as usize;
        if per_frame == 0 {
            return Err(SyncError::Validation(format!(
                "frame rate {} exceeds sample rate {}",
                fps, self.sample_rate
            )));
        }
        Ok(self.values.chunks(per_frame))
    }
}

/// Sample indices covered by `window` at `sample_rate`.
pub fn window_to_samples(window: &TimeWindow, sample_rate: u32) -> (usize, usize) {
    let rate = sample_rate as f64;
    (
        (window.start_secs * rate).floor() as usize,
        (window.end_secs * rate).floor() as usize,
    )
}

/// Cut `window` out of `channel` and normalize it.
///
/// `channel` must be a scalar column with one value per row of `table`.
pub fn extract_segment(
    table: &AlignedTable,
    channel: &Column,
    window: &TimeWindow,
    sample_rate: u32,
) -> Result<Segment> {
    if sample_rate == 0 {
        return Err(SyncError::Validation("sample rate must be positive".to_string()));
    }
    if !channel.is_scalar() {
        return Err(SyncError::NotScalar {
            column: channel.name.clone(),
            repeat: channel.repeat,
        });
    }
    if channel.rows() != table.len() {
        return Err(SyncError::ChannelMismatch {
            channel: channel.name.clone(),
            rows: channel.rows(),
            table_rows: table.len(),
        });
    }

    let (start, end) = window_to_samples(window, sample_rate);
    if start >= end {
        return Err(SyncError::Validation(
            "start time must be less than end time".to_string(),
        ));
    }
    if end > table.len() {
        return Err(SyncError::Range {
            start,
            end,
            available: table.len(),
        });
    }

    let mut values = channel.data.slice_f32(start, end);
    normalize(&mut values).map_err(|reason| SyncError::Normalization { start, end, reason })?;

    info!(
        "Extracted {} samples ({}..{}) from `{}`",
        values.len(),
        start,
        end,
        channel.name
    );

    Ok(Segment {
        channel: channel.name.clone(),
        values,
        start_sample: start,
        end_sample: end,
        sample_rate,
    })
}

/// Divide every sample by the peak magnitude.
pub fn normalize(values: &mut [f32]) -> std::result::Result<(), &'static str> {
    if values.is_empty() {
        return Err("segment is empty");
    }

    let peak = values.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    if values.iter().any(|v| !v.is_finite()) {
        return Err("segment contains non-finite samples");
    }
    if peak == 0.0 {
        return Err("segment is all zeros");
    }

    for v in values.iter_mut() {
        *v /= peak;
    }
    Ok(())
}

fn samples_per_frame(sample_rate: u32, fps: f64) -> Result<f64> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(SyncError::Validation(format!(
            "video frame rate must be positive, got {}",
            fps
        )));
    }
    Ok(sample_rate as f64 / fps)
}

/// Summary of a segment against the video it is synchronized with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentInfo {
    pub channel: String,
    pub start_sample: usize,
    pub end_sample: usize,
    pub total_samples: usize,
    pub duration_secs: f64,
    pub total_frames: usize,
    pub samples_per_frame: f64,
    pub video_fps: f64,
    pub sample_rate: u32,
}

impl SegmentInfo {
    pub fn new(segment: &Segment, video_fps: f64) -> Result<Self> {
        let per_frame = samples_per_frame(segment.sample_rate, video_fps)?;
        let total_samples = segment.total_samples();

        Ok(Self {
            channel: segment.channel.clone(),
            start_sample: segment.start_sample,
            end_sample: segment.end_sample,
            total_samples,
            duration_secs: segment.duration_secs(),
            total_frames: (total_samples as f64 / per_frame) as usize,
            samples_per_frame: per_frame,
            video_fps,
            sample_rate: segment.sample_rate,
        })
    }
}
