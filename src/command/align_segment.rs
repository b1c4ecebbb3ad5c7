use super::command::AlignArgs;
use crate::align::{
    align_streams, extract_segment, select_channel, Alignment, Segment, SegmentInfo, TimeWindow,
};
use crate::config::SyncConfig;
use crate::export::{write_segment_csv_file, write_segment_wav, SegmentReport};
use crate::trodes::read_data_file;
use anyhow::Context as _;
use std::path::PathBuf;
use tracing::info;

/// Inputs of one alignment run, resolved against the configuration.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub timestamps: PathBuf,
    pub rawdata: PathBuf,
    pub start: String,
    pub end: String,
    pub name: String,
    pub config: SyncConfig,
}

impl SyncRequest {
    pub fn from_args(args: AlignArgs, mut config: SyncConfig) -> Self {
        if let Some(rate) = args.sample_rate {
            config = config.with_sample_rate(rate);
        }
        if let Some(fps) = args.fps {
            config = config.with_video_fps(fps);
        }
        if let Some(tolerance) = args.tolerance {
            config = config.with_truncation_tolerance(tolerance);
        }
        if let Some(dir) = args.output_dir {
            config = config.with_output_dir(dir);
        }

        Self {
            timestamps: args.timestamps,
            rawdata: args.rawdata,
            start: args.start,
            end: args.end,
            name: args.name,
            config,
        }
    }
}

/// Aligned table and extracted segment for one request
#[derive(Debug)]
pub struct Synchronized {
    pub window: TimeWindow,
    pub alignment: Alignment,
    pub segment: Segment,
    pub info: SegmentInfo,
}

/// Decode both files, align them and cut the requested window.
pub fn synchronize(request: &SyncRequest) -> anyhow::Result<Synchronized> {
    let window = TimeWindow::parse(&request.start, &request.end)?;

    let timestamps = read_data_file(&request.timestamps)
        .with_context(|| format!("Failed to read timestamp file {:?}", request.timestamps))?;
    let rawdata = read_data_file(&request.rawdata)
        .with_context(|| format!("Failed to read raw data file {:?}", request.rawdata))?;

    let alignment = align_streams(
        &timestamps.stream,
        &rawdata.stream,
        request.config.truncation_tolerance,
    )?;
    let channel = select_channel(&alignment.table)?;
    let segment = extract_segment(
        &alignment.table,
        channel,
        &window,
        request.config.sample_rate,
    )?;
    let info = SegmentInfo::new(&segment, request.config.video_fps)?;

    Ok(Synchronized {
        window,
        alignment,
        segment,
        info,
    })
}

/// Run [`synchronize`] and write the WAV, CSV and JSON report.
pub fn synchronize_and_export(request: &SyncRequest) -> anyhow::Result<SegmentReport> {
    let synced = synchronize(request)?;

    let output_dir = &request.config.output_dir;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let wav_path = output_dir.join(format!("{}.wav", request.name));
    write_segment_wav(&synced.segment, &wav_path)
        .with_context(|| format!("Failed to write {:?}", wav_path))?;

    let csv_path = output_dir.join(format!("{}.csv", request.name));
    write_segment_csv_file(
        &synced.alignment.table,
        &synced.segment,
        request.config.video_fps,
        &csv_path,
    )
    .with_context(|| format!("Failed to write {:?}", csv_path))?;

    let mut report = SegmentReport::new(
        request.timestamps.clone(),
        request.rawdata.clone(),
        (synced.window.start_secs, synced.window.end_secs),
        synced.info,
        synced.alignment.notice,
    );
    report.wav_path = Some(wav_path);
    report.csv_path = Some(csv_path);

    let report_path = output_dir.join(format!("{}.json", request.name));
    report
        .save(&report_path)
        .with_context(|| format!("Failed to write {:?}", report_path))?;

    info!("Export complete: {:?}", output_dir);
    Ok(report)
}

fn format_report(report: &SegmentReport) -> String {
    let info = &report.segment;
    let mut lines = vec![
        format!("Channel: {}", info.channel),
        format!("Samples: {}..{}", info.start_sample, info.end_sample),
        format!("Segment Duration: {:.2} seconds", info.duration_secs),
        format!("Total Frames: {}", info.total_frames),
        format!("Total Samples: {}", info.total_samples),
        format!("Video FPS: {}", info.video_fps),
        format!("Sample Rate: {}", info.sample_rate),
    ];
    if let Some(ref notice) = report.truncation {
        lines.push(format!(
            "Warning: streams differ in length ({} vs {}), {} rows dropped",
            notice.timestamp_rows, notice.rawdata_rows, notice.dropped_rows
        ));
    }
    for path in [&report.wav_path, &report.csv_path].into_iter().flatten() {
        lines.push(format!("Wrote {}", path.display()));
    }
    lines.join("\n")
}

pub async fn align_segment(args: AlignArgs, config: SyncConfig) -> anyhow::Result<()> {
    let request = SyncRequest::from_args(args, config);
    let report = tokio::task::spawn_blocking(move || synchronize_and_export(&request)).await??;

    println!("{}", format_report(&report));
    Ok(())
}
