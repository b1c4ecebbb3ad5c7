use super::column::{Column, ColumnData};
use super::schema::Schema;
use crate::error::{Result, SyncError};
use std::io::Cursor;
use tracing::debug;

/// Column-oriented records decoded from one file.
#[derive(Debug, Clone)]
pub struct RecordStream {
    schema: Schema,
    columns: Vec<Column>,
    len: usize,
}

impl RecordStream {
    /// Decode a tightly packed, little-endian payload laid out per `schema`.
    ///
    /// A trailing partial record is rejected rather than dropped.
    pub fn decode(schema: Schema, payload: &[u8]) -> Result<Self> {
        let width = schema.record_width();
        if width == 0 {
            return Err(SyncError::format("record width is zero"));
        }
        if payload.len() % width != 0 {
            return Err(SyncError::format(format!(
                "payload of {} bytes is not a multiple of the {}-byte record width ({} trailing bytes)",
                payload.len(),
                width,
                payload.len() % width
            )));
        }

        let len = payload.len() / width;
        let mut data: Vec<ColumnData> = schema
            .fields()
            .iter()
            .map(|f| ColumnData::with_capacity(f.scalar, len * f.repeat))
            .collect();

        for record in payload.chunks_exact(width) {
            let mut rdr = Cursor::new(record);
            for (field, column) in schema.fields().iter().zip(data.iter_mut()) {
                for _ in 0..field.repeat {
                    column.push_le(&mut rdr)?;
                }
            }
        }

        let columns = schema
            .fields()
            .iter()
            .zip(data)
            .map(|(field, data)| Column {
                name: field.name.clone(),
                repeat: field.repeat,
                data,
            })
            .collect();

        debug!("Decoded {} records of {} bytes", len, width);

        Ok(Self {
            schema,
            columns,
            len,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Record count
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trodes::column::Value;

    fn pack(records: &[(u32, [i16; 2], f32)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (t, ch, v) in records {
            bytes.extend_from_slice(&t.to_le_bytes());
            for s in ch {
                bytes.extend_from_slice(&s.to_le_bytes());
            }
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_matches_packed_records() {
        let schema = Schema::parse("<time uint32><ch 2*int16><v float32>").unwrap();
        let records = [(0u32, [1i16, -1], 0.25f32), (1, [300, -300], -2.5), (2, [0, 7], 1e3)];
        let stream = RecordStream::decode(schema, &pack(&records)).unwrap();

        assert_eq!(stream.len(), records.len());
        let time = stream.column("time").unwrap();
        let ch = stream.column("ch").unwrap();
        let v = stream.column("v").unwrap();
        for (i, (t, c, f)) in records.iter().enumerate() {
            assert_eq!(time.value_at(i, 0), Some(Value::UInt32(*t)));
            assert_eq!(ch.row(i).unwrap(), vec![Value::Int16(c[0]), Value::Int16(c[1])]);
            assert_eq!(v.value_at(i, 0), Some(Value::Float32(*f)));
        }
    }

    #[test]
    fn test_decode_every_scalar_type() {
        let schema = Schema::parse(
            "<a uint8><b uint16><c uint32><d uint64><e int8><f int16>\
             <g int32><h int64><i float32><j double><rep 3*int64>",
        )
        .unwrap();
        assert_eq!(schema.record_width(), 1 + 2 + 4 + 8 + 1 + 2 + 4 + 8 + 4 + 8 + 24);

        let mut bytes = Vec::new();
        for low in [true, false] {
            let pick = |lo: i64, hi: i64| if low { lo } else { hi };
            bytes.extend_from_slice(&(if low { 0u8 } else { u8::MAX }).to_le_bytes());
            bytes.extend_from_slice(&(if low { 1u16 } else { u16::MAX }).to_le_bytes());
            bytes.extend_from_slice(&(if low { 2u32 } else { u32::MAX }).to_le_bytes());
            bytes.extend_from_slice(&(if low { 3u64 } else { u64::MAX }).to_le_bytes());
            bytes.extend_from_slice(&(if low { i8::MIN } else { i8::MAX }).to_le_bytes());
            bytes.extend_from_slice(&(if low { i16::MIN } else { -1i16 }).to_le_bytes());
            bytes.extend_from_slice(&(if low { i32::MIN } else { i32::MAX }).to_le_bytes());
            bytes.extend_from_slice(&pick(i64::MIN, i64::MAX).to_le_bytes());
            bytes.extend_from_slice(&(if low { -1.5f32 } else { f32::MAX }).to_le_bytes());
            bytes.extend_from_slice(&(if low { 0.1f64 } else { -1e300f64 }).to_le_bytes());
            for k in 0..3i64 {
                bytes.extend_from_slice(&pick(-k - 1, i64::MAX - k).to_le_bytes());
            }
        }

        let stream = RecordStream::decode(schema, &bytes).unwrap();
        assert_eq!(stream.len(), 2);

        let at = |name: &str, row: usize| stream.column(name).unwrap().value_at(row, 0).unwrap();
        assert_eq!(at("a", 0), Value::UInt8(0));
        assert_eq!(at("a", 1), Value::UInt8(u8::MAX));
        assert_eq!(at("b", 0), Value::UInt16(1));
        assert_eq!(at("b", 1), Value::UInt16(u16::MAX));
        assert_eq!(at("c", 0), Value::UInt32(2));
        assert_eq!(at("c", 1), Value::UInt32(u32::MAX));
        assert_eq!(at("d", 0), Value::UInt64(3));
        assert_eq!(at("d", 1), Value::UInt64(u64::MAX));
        assert_eq!(at("e", 0), Value::Int8(i8::MIN));
        assert_eq!(at("e", 1), Value::Int8(i8::MAX));
        assert_eq!(at("f", 0), Value::Int16(i16::MIN));
        assert_eq!(at("f", 1), Value::Int16(-1));
        assert_eq!(at("g", 0), Value::Int32(i32::MIN));
        assert_eq!(at("g", 1), Value::Int32(i32::MAX));
        assert_eq!(at("h", 0), Value::Int64(i64::MIN));
        assert_eq!(at("h", 1), Value::Int64(i64::MAX));
        assert_eq!(at("i", 0), Value::Float32(-1.5));
        assert_eq!(at("i", 1), Value::Float32(f32::MAX));
        assert_eq!(at("j", 0), Value::Float64(0.1));
        assert_eq!(at("j", 1), Value::Float64(-1e300));

        let rep = stream.column("rep").unwrap();
        assert_eq!(rep.row_len(), 3);
        for k in 0..3 {
            assert_eq!(rep.value_at(0, k), Some(Value::Int64(-(k as i64) - 1)));
            assert_eq!(rep.value_at(1, k), Some(Value::Int64(i64::MAX - k as i64)));
        }
        assert_eq!(rep.value_at(0, 3), None);
        assert_eq!(rep.value_at(2, 0), None);
    }

    #[test]
    fn test_repeated_field_rows_have_fixed_length() {
        let schema = Schema::parse("<ch 2*int16>").unwrap();
        let stream = RecordStream::decode(schema, &[0u8; 4 * 5]).unwrap();
        let ch = stream.column("ch").unwrap();
        assert_eq!(ch.rows(), 5);
        for i in 0..5 {
            assert_eq!(ch.row(i).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_partial_trailing_record() {
        let schema = Schema::parse("<time uint32><v int16>").unwrap();
        let err = RecordStream::decode(schema, &[0u8; 13]).unwrap_err();
        assert!(matches!(err, SyncError::Format(msg) if msg.contains("not a multiple")));
    }

    #[test]
    fn test_empty_payload() {
        let schema = Schema::parse("<time uint32>").unwrap();
        let stream = RecordStream::decode(schema, &[]).unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.column("time").unwrap().rows(), 0);
    }
}
