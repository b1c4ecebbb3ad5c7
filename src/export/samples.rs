//! Per-sample CSV of a segment: timestamp, raw voltage, video frame and second.

use crate::align::{AlignedTable, Segment};
use crate::error::{Result, SyncError};
use crate::trodes::Column;
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::info;

pub const TIME_COLUMN: &str = "time";

#[derive(Debug, Serialize)]
struct SampleRow {
    time: String,
    voltage: String,
    frame: usize,
    second: u64,
}

/// Write one row per sample index in `segment.start_sample..segment.end_sample`.
///
/// `voltage` is the raw (un-normalized) channel value.
pub fn write_segment_csv<W: io::Write>(
    table: &AlignedTable,
    segment: &Segment,
    video_fps: f64,
    out: W,
) -> Result<usize> {
    let time = table
        .column(TIME_COLUMN)
        .ok_or_else(|| SyncError::MissingColumn(TIME_COLUMN.to_string()))?;
    let voltage = table
        .column(&segment.channel)
        .ok_or_else(|| SyncError::MissingColumn(segment.channel.clone()))?;
    for column in [time, voltage] {
        if !column.is_scalar() {
            return Err(SyncError::NotScalar {
                column: column.name.clone(),
                repeat: column.repeat,
            });
        }
    }

    if segment.sample_rate == 0 {
        return Err(SyncError::Validation("sample rate must be positive".to_string()));
    }
    if !video_fps.is_finite() || video_fps <= 0.0 {
        return Err(SyncError::Validation(format!(
            "video frame rate must be positive, got {}",
            video_fps
        )));
    }
    let samples_per_frame = segment.sample_rate as f64 / video_fps;
    let end = segment.end_sample.min(table.len());

    let mut writer = csv::Writer::from_writer(out);
    let mut rows = 0;
    for i in segment.start_sample..end {
        let cell = |col: &Column| {
            col.value_at(i, 0).map(|v| v.to_string()).unwrap_or_default()
        };
        writer.serialize(SampleRow {
            time: cell(time),
            voltage: cell(voltage),
            frame: ((i - segment.start_sample) as f64 / samples_per_frame) as usize,
            second: i as u64 / segment.sample_rate as u64,
        })?;
        rows += 1;
    }
    writer.flush()?;

    Ok(rows)
}

pub fn write_segment_csv_file(
    table: &AlignedTable,
    segment: &Segment,
    video_fps: f64,
    path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let rows = write_segment_csv(table, segment, video_fps, io::BufWriter::new(file))?;
    info!("Wrote {} rows to {:?}", rows, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::table::tests::counter_stream;
    use crate::align::{align_streams, extract_segment, select_channel, TimeWindow};
    use crate::trodes::{RecordStream, Schema};

    fn table() -> AlignedTable {
        let ts = counter_stream("time", 40);
        let payload: Vec<u8> = (0..40i16).flat_map(|s| (s - 20).to_le_bytes()).collect();
        let rd = RecordStream::decode(Schema::parse("<voltage int16>").unwrap(), &payload).unwrap();
        align_streams(&ts, &rd, 0).unwrap().table
    }

    #[test]
    fn test_write_segment_csv() {
        let table = table();
        let channel = select_channel(&table).unwrap();
        let window = TimeWindow::new(1.0, 3.0).unwrap();
        let segment = extract_segment(&table, channel, &window, 10).unwrap();

        let mut out = Vec::new();
        let rows = write_segment_csv(&table, &segment, 5.0, &mut out).unwrap();
        assert_eq!(rows, 20);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,voltage,frame,second");
        // sample 10: time 10, voltage -10, first frame, second 1
        assert_eq!(lines[1], "10,-10,0,1");
        // sample 12 starts the second frame (2 samples per frame)
        assert_eq!(lines[3], "12,-8,1,1");
        assert_eq!(lines[20], "29,9,9,2");
    }

    #[test]
    fn test_missing_time_column() {
        let ts = counter_stream("stamp", 10);
        let rd = RecordStream::decode(
            Schema::parse("<voltage int16>").unwrap(),
            &[1u8, 0].repeat(10),
        )
        .unwrap();
        let table = align_streams(&ts, &rd, 0).unwrap().table;
        let channel = select_channel(&table).unwrap();
        let window = TimeWindow::new(0.0, 0.5).unwrap();
        let segment = extract_segment(&table, channel, &window, 10).unwrap();

        let err = write_segment_csv(&table, &segment, 30.0, Vec::new()).unwrap_err();
        assert!(matches!(err, SyncError::MissingColumn(name) if name == "time"));
    }

    #[test]
    fn test_repeated_time_column() {
        let ts = RecordStream::decode(
            Schema::parse("<time 2*uint32>").unwrap(),
            &[0u8; 8 * 10],
        )
        .unwrap();
        let payload: Vec<u8> = (1..=10i16).flat_map(|s| s.to_le_bytes()).collect();
        let rd = RecordStream::decode(Schema::parse("<voltage int16>").unwrap(), &payload).unwrap();
        let table = align_streams(&ts, &rd, 0).unwrap().table;
        let channel = select_channel(&table).unwrap();
        let window = TimeWindow::new(0.0, 0.5).unwrap();
        let segment = extract_segment(&table, channel, &window, 10).unwrap();

        let err = write_segment_csv(&table, &segment, 30.0, Vec::new()).unwrap_err();
        assert!(matches!(err, SyncError::NotScalar { column, repeat: 2 } if column == "time"));
    }
}
