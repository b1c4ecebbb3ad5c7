//! Runtime configuration.
//!
//! Defaults can be overridden through the environment (a `.env` file is
//! loaded in `main`), and again per invocation from the command line.

use std::path::PathBuf;
use tracing::warn;

/// Acquisition rate of the recording system, in samples per second.
pub const DEFAULT_SAMPLE_RATE: u32 = 30_000;
pub const DEFAULT_VIDEO_FPS: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Samples per second used to turn wall-clock windows into record indices
    pub sample_rate: u32,
    /// Video frame rate used when the caller does not supply one
    pub video_fps: f64,
    /// Stream length difference (in records) tolerated before a truncation notice is raised
    pub truncation_tolerance: usize,
    /// Directory exports are written to
    pub output_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            video_fps: DEFAULT_VIDEO_FPS,
            truncation_tolerance: 0,
            output_dir: PathBuf::from("exports"),
        }
    }
}

impl SyncConfig {
    /// Build from `SPIKESYNC_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(rate) = parse_var(&lookup, "SPIKESYNC_SAMPLE_RATE") {
            if rate > 0 {
                config.sample_rate = rate;
            } else {
                warn!("Ignoring SPIKESYNC_SAMPLE_RATE=0");
            }
        }
        if let Some(fps) = parse_var::<f64, _>(&lookup, "SPIKESYNC_VIDEO_FPS") {
            if fps.is_finite() && fps > 0.0 {
                config.video_fps = fps;
            } else {
                warn!("Ignoring non-positive SPIKESYNC_VIDEO_FPS={}", fps);
            }
        }
        if let Some(tolerance) = parse_var(&lookup, "SPIKESYNC_TRUNCATION_TOLERANCE") {
            config.truncation_tolerance = tolerance;
        }
        if let Some(dir) = lookup("SPIKESYNC_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_video_fps(mut self, fps: f64) -> Self {
        self.video_fps = fps;
        self
    }

    pub fn with_truncation_tolerance(mut self, tolerance: usize) -> Self {
        self.truncation_tolerance = tolerance;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}
