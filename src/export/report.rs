use crate::align::{SegmentInfo, TruncationNotice};
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything an external muxer needs to pair the exported audio with video.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentReport {
    /// When the export was produced (RFC 3339)
    pub generated_at: String,
    pub timestamps_file: PathBuf,
    pub rawdata_file: PathBuf,
    /// Window as requested, in seconds
    pub start_secs: f64,
    pub end_secs: f64,
    pub segment: SegmentInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<TruncationNotice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wav_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
}

impl SegmentReport {
    pub fn new(
        timestamps_file: PathBuf,
        rawdata_file: PathBuf,
        window: (f64, f64),
        segment: SegmentInfo,
        truncation: Option<TruncationNotice>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            timestamps_file,
            rawdata_file,
            start_secs: window.0,
            end_secs: window.1,
            segment,
            truncation,
            wav_path: None,
            csv_path: None,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        info!("Wrote segment report to {:?}", path);
        Ok(())
    }
}
