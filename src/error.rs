use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Malformed header or payload not covered by a more specific variant below.
    #[error("Format error: {0}")]
    Format(String),
    #[error("Format error: header line {line} has no `:` separator: `{text}`")]
    HeaderLine { line: usize, text: String },
    #[error("Format error: duplicate field name `{field}`")]
    DuplicateField { field: String },
    #[error("Format error: both streams define a field named `{field}`")]
    FieldCollision { field: String },
    #[error("Format error: field `{field}` is too wide ({repeat} x {scalar})")]
    FieldTooWide {
        field: String,
        scalar: crate::trodes::ScalarType,
        repeat: usize,
    },
    #[error("Unsupported field type `{token}` for field `{field}`")]
    Schema { field: String, token: String },
    #[error("No valid audio channel found (accepted types: {accepted})")]
    ChannelNotFound { accepted: String },
    #[error("Invalid time window: {0}")]
    Validation(String),
    #[error("Requested samples {start}..{end} exceed aligned table length {available}")]
    Range {
        start: usize,
        end: usize,
        available: usize,
    },
    #[error("Cannot normalize segment {start}..{end}: {reason}")]
    Normalization {
        start: usize,
        end: usize,
        reason: &'static str,
    },
    #[error("Column `{0}` not found in aligned table")]
    MissingColumn(String),
    #[error("Column `{column}` holds {repeat} values per row, expected one")]
    NotScalar { column: String, repeat: usize },
    #[error("Channel `{channel}` has {rows} rows but the aligned table has {table_rows}")]
    ChannelMismatch {
        channel: String,
        rows: usize,
        table_rows: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV write error: {0}")]
    Wav(#[from] hound::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    /// Whether this is one of the malformed-file conditions.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            SyncError::Format(_)
                | SyncError::HeaderLine { .. }
                | SyncError::DuplicateField { .. }
                | SyncError::FieldCollision { .. }
                | SyncError::FieldTooWide { .. }
        )
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        SyncError::Format(msg.into())
    }
}
