//! Typed column storage for decoded records.

use super::scalar::ScalarType;
use byteorder::{LittleEndian, ReadBytesExt};
use std::fmt;
use std::io::Read;

/// A single decoded value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::UInt8(v) => v as f64,
            Value::UInt16(v) => v as f64,
            Value::UInt32(v) => v as f64,
            Value::UInt64(v) => v as f64,
            Value::Int8(v) => v as f64,
            Value::Int16(v) => v as f64,
            Value::Int32(v) => v as f64,
            Value::Int64(v) => v as f64,
            Value::Float32(v) => v as f64,
            Value::Float64(v) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::UInt8(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
        }
    }
}

/// Flat storage of every value in a column, record after record.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

macro_rules! each_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ColumnData::UInt8($v) => $body,
            ColumnData::UInt16($v) => $body,
            ColumnData::UInt32($v) => $body,
            ColumnData::UInt64($v) => $body,
            ColumnData::Int8($v) => $body,
            ColumnData::Int16($v) => $body,
            ColumnData::Int32($v) => $body,
            ColumnData::Int64($v) => $body,
            ColumnData::Float32($v) => $body,
            ColumnData::Float64($v) => $body,
        }
    };
}

impl ColumnData {
    pub fn with_capacity(scalar: ScalarType, capacity: usize) -> Self {
        match scalar {
            ScalarType::UInt8 => ColumnData::UInt8(Vec::with_capacity(capacity)),
            ScalarType::UInt16 => ColumnData::UInt16(Vec::with_capacity(capacity)),
            ScalarType::UInt32 => ColumnData::UInt32(Vec::with_capacity(capacity)),
            ScalarType::UInt64 => ColumnData::UInt64(Vec::with_capacity(capacity)),
            ScalarType::Int8 => ColumnData::Int8(Vec::with_capacity(capacity)),
            ScalarType::Int16 => ColumnData::Int16(Vec::with_capacity(capacity)),
            ScalarType::Int32 => ColumnData::Int32(Vec::with_capacity(capacity)),
            ScalarType::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            ScalarType::Float32 => ColumnData::Float32(Vec::with_capacity(capacity)),
            ScalarType::Float64 => ColumnData::Float64(Vec::with_capacity(capacity)),
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ColumnData::UInt8(_) => ScalarType::UInt8,
            ColumnData::UInt16(_) => ScalarType::UInt16,
            ColumnData::UInt32(_) => ScalarType::UInt32,
            ColumnData::UInt64(_) => ScalarType::UInt64,
            ColumnData::Int8(_) => ScalarType::Int8,
            ColumnData::Int16(_) => ScalarType::Int16,
            ColumnData::Int32(_) => ScalarType::Int32,
            ColumnData::Int64(_) => ScalarType::Int64,
            ColumnData::Float32(_) => ScalarType::Float32,
            ColumnData::Float64(_) => ScalarType::Float64,
        }
    }

    /// Number of stored values (records × repeat)
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one little-endian value of this column's type and append it.
    pub fn push_le<R: Read>(&mut self, rdr: &mut R) -> std::io::Result<()> {
        match self {
            ColumnData::UInt8(v) => v.push(rdr.read_u8()?),
            ColumnData::UInt16(v) => v.push(rdr.read_u16::<LittleEndian>()?),
            ColumnData::UInt32(v) => v.push(rdr.read_u32::<LittleEndian>()?),
            ColumnData::UInt64(v) => v.push(rdr.read_u64::<LittleEndian>()?),
            ColumnData::Int8(v) => v.push(rdr.read_i8()?),
            ColumnData::Int16(v) => v.push(rdr.read_i16::<LittleEndian>()?),
            ColumnData::Int32(v) => v.push(rdr.read_i32::<LittleEndian>()?),
            ColumnData::Int64(v) => v.push(rdr.read_i64::<LittleEndian>()?),
            ColumnData::Float32(v) => v.push(rdr.read_f32::<LittleEndian>()?),
            ColumnData::Float64(v) => v.push(rdr.read_f64::<LittleEndian>()?),
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            ColumnData::UInt8(v) => v.get(index).copied().map(Value::UInt8),
            ColumnData::UInt16(v) => v.get(index).copied().map(Value::UInt16),
            ColumnData::UInt32(v) => v.get(index).copied().map(Value::UInt32),
            ColumnData::UInt64(v) => v.get(index).copied().map(Value::UInt64),
            ColumnData::Int8(v) => v.get(index).copied().map(Value::Int8),
            ColumnData::Int16(v) => v.get(index).copied().map(Value::Int16),
            ColumnData::Int32(v) => v.get(index).copied().map(Value::Int32),
            ColumnData::Int64(v) => v.get(index).copied().map(Value::Int64),
            ColumnData::Float32(v) => v.get(index).copied().map(Value::Float32),
            ColumnData::Float64(v) => v.get(index).copied().map(Value::Float64),
        }
    }

    /// Copy of the first `n` values
    fn prefix(&self, n: usize) -> Self {
        match self {
            ColumnData::UInt8(v) => ColumnData::UInt8(v[..n.min(v.len())].to_vec()),
            ColumnData::UInt16(v) => ColumnData::UInt16(v[..n.min(v.len())].to_vec()),
            ColumnData::UInt32(v) => ColumnData::UInt32(v[..n.min(v.len())].to_vec()),
            ColumnData::UInt64(v) => ColumnData::UInt64(v[..n.min(v.len())].to_vec()),
            ColumnData::Int8(v) => ColumnData::Int8(v[..n.min(v.len())].to_vec()),
            ColumnData::Int16(v) => ColumnData::Int16(v[..n.min(v.len())].to_vec()),
            ColumnData::Int32(v) => ColumnData::Int32(v[..n.min(v.len())].to_vec()),
            ColumnData::Int64(v) => ColumnData::Int64(v[..n.min(v.len())].to_vec()),
            ColumnData::Float32(v) => ColumnData::Float32(v[..n.min(v.len())].to_vec()),
            ColumnData::Float64(v) => ColumnData::Float64(v[..n.min(v.len())].to_vec()),
        }
    }

    /// Values in `start..end` converted to `f32`. Out-of-range bounds are clamped.
    pub fn slice_f32(&self, start: usize, end: usize) -> Vec<f32> {
        each_variant!(self, v => {
            let end = end.min(v.len());
            let start = start.min(end);
            v[start..end].iter().map(|&x| x as f32).collect()
        })
    }
}

/// One named column of a record stream.
///
/// A field declared with a repeat count `K` stores `K` values per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub repeat: usize,
    pub data: ColumnData,
}

impl Column {
    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    pub fn rows(&self) -> usize {
        self.data.len() / self.repeat.max(1)
    }

    /// Values per row
    pub fn row_len(&self) -> usize {
        self.repeat
    }

    pub fn is_scalar(&self) -> bool {
        self.repeat == 1
    }

    /// Element `k` of row `row`
    pub fn value_at(&self, row: usize, k: usize) -> Option<Value> {
        if k >= self.repeat || row >= self.rows() {
            return None;
        }
        self.data.get(row * self.repeat + k)
    }

    /// All elements of one row
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        (0..self.repeat).map(|k| self.value_at(row, k)).collect()
    }

    /// Numeric value of a scalar column at `row`. `None` for repeated fields.
    pub fn as_f64(&self, row: usize) -> Option<f64> {
        if !self.is_scalar() {
            return None;
        }
        self.value_at(row, 0).map(Value::as_f64)
    }

    /// Copy holding only the first `rows` rows
    pub fn truncated(&self, rows: usize) -> Self {
        Self {
            name: self.name.clone(),
            repeat: self.repeat,
            data: self.data.prefix(rows * self.repeat),
        }
    }
}
