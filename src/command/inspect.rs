use super::command::InspectArgs;
use crate::trodes::{read_data_file, DataFile, FieldDescriptor};
use anyhow::Context as _;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
struct FileSummary<'a> {
    settings: &'a BTreeMap<String, String>,
    fields: &'a [FieldDescriptor],
    record_width: usize,
    records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    clock_rate: Option<u32>,
}

fn summarize(file: &DataFile) -> FileSummary<'_> {
    FileSummary {
        settings: &file.header.settings,
        fields: file.stream.schema().fields(),
        record_width: file.stream.schema().record_width(),
        records: file.stream.len(),
        clock_rate: file.header.clock_rate(),
    }
}

fn render_text(summary: &FileSummary<'_>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Settings:");
    for (key, value) in summary.settings {
        let _ = writeln!(output, "  {}: {}", key, value);
    }

    let _ = writeln!(output, "Fields ({} bytes per record):", summary.record_width);
    for field in summary.fields {
        if field.repeat > 1 {
            let _ = writeln!(output, "  {:<16} {}*{}", field.name, field.repeat, field.scalar);
        } else {
            let _ = writeln!(output, "  {:<16} {}", field.name, field.scalar);
        }
    }

    let _ = writeln!(output, "Records: {}", summary.records);
    if let Some(rate) = summary.clock_rate {
        let _ = writeln!(
            output,
            "Duration at clock rate {}: {:.2}s",
            rate,
            summary.records as f64 / rate as f64
        );
    }

    output
}

pub async fn inspect(args: InspectArgs) -> anyhow::Result<()> {
    let path = args.file.clone();
    let file = tokio::task::spawn_blocking(move || read_data_file(&path))
        .await?
        .with_context(|| format!("Failed to read {:?}", args.file))?;

    let summary = summarize(&file);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&summary));
    }
    Ok(())
}
