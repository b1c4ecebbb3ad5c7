//! Decoder for extracted acquisition data files: an ASCII settings header
//! followed by fixed-width little-endian records.

pub mod column;
pub mod header;
pub mod reader;
pub mod scalar;
pub mod schema;

pub use column::{Column, ColumnData, Value};
pub use header::Header;
pub use reader::RecordStream;
pub use scalar::ScalarType;
pub use schema::{FieldDescriptor, Schema};

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// A fully decoded data file
#[derive(Debug, Clone)]
pub struct DataFile {
    pub header: Header,
    pub stream: RecordStream,
}

impl DataFile {
    /// Decode an in-memory file image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = Header::parse(bytes)?;
        let schema = Schema::parse(header.fields_spec())?;
        let stream = RecordStream::decode(schema, &bytes[header.payload_offset..])?;
        Ok(Self { header, stream })
    }
}

pub fn read_data_file(path: &Path) -> Result<DataFile> {
    let bytes = std::fs::read(path)?;
    let file = DataFile::from_bytes(&bytes)?;

    info!(
        "Read {:?}: {} settings, {} fields, {} records",
        path,
        file.header.settings.len(),
        file.stream.schema().fields().len(),
        file.stream.len()
    );

    Ok(file)
}

/// Build a file image from a field spec and raw payload. Used by tests.
#[cfg(test)]
pub(crate) fn file_image(fields: &str, payload: &[u8]) -> Vec<u8> {
    let mut bytes = format!(
        "{}\nDescription: test data\nFields: {}\n{}\n",
        header::START_SENTINEL,
        fields,
        header::END_SENTINEL
    )
    .into_bytes();
    bytes.extend_from_slice(payload);
    bytes
}
