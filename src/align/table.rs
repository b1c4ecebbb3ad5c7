//! Positional alignment of the timestamp and raw-data streams.
//!
//! Rows are paired by position only. The longer stream's tail is dropped and
//! nothing checks that both streams start at the same logical sample.

use crate::error::{Result, SyncError};
use crate::trodes::{Column, RecordStream};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamRole {
    Timestamps,
    RawData,
}

/// Raised when alignment dropped more rows than the configured tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruncationNotice {
    pub timestamp_rows: usize,
    pub rawdata_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
    pub longer: StreamRole,
}

/// Columns of both streams sharing a single row count.
#[derive(Debug, Clone)]
pub struct AlignedTable {
    columns: Vec<Column>,
    len: usize,
}

impl AlignedTable {
    /// Columns in table order: timestamp stream fields first, then raw-data fields.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone)]
pub struct Alignment {
    pub table: AlignedTable,
    pub notice: Option<TruncationNotice>,
}

/// Rows kept when pairing streams of length `a` and `b`.
pub fn truncation_length(a: usize, b: usize) -> usize {
    a.min(b)
}

/// Merge two streams into one table of `min(len)` rows.
///
/// Field names must be distinct across the two streams.
pub fn align_streams(
    timestamps: &RecordStream,
    rawdata: &RecordStream,
    tolerance: usize,
) -> Result<Alignment> {
    let mut names = HashSet::new();
    for column in timestamps.columns().iter().chain(rawdata.columns()) {
        if !names.insert(column.name.as_str()) {
            return Err(SyncError::FieldCollision {
                field: column.name.clone(),
            });
        }
    }

    let kept = truncation_length(timestamps.len(), rawdata.len());
    let columns = timestamps
        .columns()
        .iter()
        .chain(rawdata.columns())
        .map(|c| c.truncated(kept))
        .collect();

    let notice = truncation_notice(timestamps.len(), rawdata.len(), tolerance);
    if let Some(ref n) = notice {
        warn!(
            "Stream lengths differ (timestamps: {}, raw data: {}); dropping {} trailing {:?} rows",
            n.timestamp_rows, n.rawdata_rows, n.dropped_rows, n.longer
        );
    }

    info!("Aligned {} rows", kept);

    Ok(Alignment {
        table: AlignedTable { columns, len: kept },
        notice,
    })
}

fn truncation_notice(
    timestamp_rows: usize,
    rawdata_rows: usize,
    tolerance: usize,
) -> Option<TruncationNotice> {
    let dropped = timestamp_rows.abs_diff(rawdata_rows);
    if dropped <= tolerance {
        return None;
    }

    Some(TruncationNotice {
        timestamp_rows,
        rawdata_rows,
        kept_rows: truncation_length(timestamp_rows, rawdata_rows),
        dropped_rows: dropped,
        longer: if timestamp_rows > rawdata_rows {
            StreamRole::Timestamps
        } else {
            StreamRole::RawData
        },
    })
}
