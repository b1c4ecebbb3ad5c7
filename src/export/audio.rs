use crate::align::Segment;
use crate::error::Result;
use hound::{WavSpec, WavWriter};
use std::path::Path;
use tracing::info;

fn segment_spec(segment: &Segment) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: segment.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

/// Write the normalized samples as a mono float WAV at the segment's sample rate.
pub fn write_segment_wav(segment: &Segment, path: &Path) -> Result<()> {
    let mut writer = WavWriter::create(path, segment_spec(segment))?;
    for &sample in &segment.values {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!(
        "Wrote {:?} ({:.2}s, {} samples at {} Hz)",
        path,
        segment.duration_secs(),
        segment.values.len(),
        segment.sample_rate
    );
    Ok(())
}
