//! Record layout described by the `fields` setting.
//!
//! Each field is written as `name typeSpec`, where `typeSpec` is a bare type
//! token or `N*type` / `type*N` for a packed array of `N` values. Angle
//! brackets only group the pairs and carry no meaning.

use super::scalar::ScalarType;
use crate::error::{Result, SyncError};
use serde::Serialize;
use std::collections::HashSet;

const REPEAT_MARKER: char = '*';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub scalar: ScalarType,
    pub repeat: usize,
}

impl FieldDescriptor {
    /// Bytes this field occupies in one record, `None` if that overflows `usize`.
    pub fn width(&self) -> Option<usize> {
        self.scalar.width().checked_mul(self.repeat)
    }
}

/// Ordered fields of one record. Fields are packed back to back with no padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    record_width: usize,
}

impl Schema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        if fields.is_empty() {
            return Err(SyncError::format("field specification declares no fields"));
        }

        let mut seen = HashSet::new();
        let mut record_width = 0usize;
        for field in &fields {
            if field.repeat == 0 {
                return Err(SyncError::format(format!(
                    "field `{}` has a repeat count of zero",
                    field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SyncError::DuplicateField {
                    field: field.name.clone(),
                });
            }
            record_width = field
                .width()
                .and_then(|w| record_width.checked_add(w))
                .ok_or_else(|| SyncError::FieldTooWide {
                    field: field.name.clone(),
                    scalar: field.scalar,
                    repeat: field.repeat,
                })?;
        }

        Ok(Self {
            fields,
            record_width,
        })
    }

    /// Parse a field specification such as `<time uint32><channels 4*int16>`.
    pub fn parse(spec: &str) -> Result<Self> {
        let cleaned = spec.replace(['<', '>'], " ");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        if tokens.len() % 2 != 0 {
            return Err(SyncError::format(format!(
                "field specification has {} tokens, expected name/type pairs",
                tokens.len()
            )));
        }

        let fields = tokens
            .chunks_exact(2)
            .map(|pair| parse_field(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;

        Self::new(fields)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Total bytes of one packed record
    pub fn record_width(&self) -> usize {
        self.record_width
    }
}

fn parse_field(name: &str, type_spec: &str) -> Result<FieldDescriptor> {
    let (token, repeat) = match type_spec.split_once(REPEAT_MARKER) {
        None => (type_spec, 1),
        Some((left, right)) => {
            let (token, count) = if is_count(left) && !is_count(right) {
                (right, left)
            } else if is_count(right) && !is_count(left) {
                (left, right)
            } else {
                return Err(SyncError::format(format!(
                    "field `{}` has malformed repeat spec `{}`",
                    name, type_spec
                )));
            };
            let repeat = count.parse::<usize>().map_err(|_| {
                SyncError::format(format!(
                    "field `{}` repeat count `{}` is out of range",
                    name, count
                ))
            })?;
            (token, repeat)
        }
    };

    let scalar = ScalarType::from_token(token).ok_or_else(|| SyncError::Schema {
        field: name.to_string(),
        token: token.to_string(),
    })?;

    Ok(FieldDescriptor {
        name: name.to_string(),
        scalar,
        repeat,
    })
}

fn is_count(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let schema = Schema::parse("<time uint32><voltage int16>").unwrap();
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.fields()[0].name, "time");
        assert_eq!(schema.fields()[0].scalar, ScalarType::UInt32);
        assert_eq!(schema.fields()[1].scalar, ScalarType::Int16);
        assert_eq!(schema.record_width(), 6);
    }

    #[test]
    fn test_repeat_on_either_side() {
        let schema = Schema::parse("<ch 4*int16> <aux uint8*3>").unwrap();
        let ch = schema.field("ch").unwrap();
        assert_eq!((ch.scalar, ch.repeat), (ScalarType::Int16, 4));
        let aux = schema.field("aux").unwrap();
        assert_eq!((aux.scalar, aux.repeat), (ScalarType::UInt8, 3));
        assert_eq!(schema.record_width(), 8 + 3);
    }

    #[test]
    fn test_collapses_whitespace() {
        let schema = Schema::parse("  <time\tuint32>\n\n<v   float32>  ").unwrap();
        assert_eq!(schema.fields().len(), 2);
    }

    #[test]
    fn test_odd_token_count() {
        let err = Schema::parse("<time uint32><voltage>").unwrap_err();
        assert!(matches!(err, SyncError::Format(_)));
    }

    #[test]
    fn test_unknown_type_is_schema_error() {
        let err = Schema::parse("<time uint32><v complex64>").unwrap_err();
        match err {
            SyncError::Schema { field, token } => {
                assert_eq!(field, "v");
                assert_eq!(token, "complex64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_in_repeat() {
        let err = Schema::parse("<v 2*bogus>").unwrap_err();
        assert!(matches!(err, SyncError::Schema { token, .. } if token == "bogus"));
    }

    #[test]
    fn test_duplicate_field() {
        let err = Schema::parse("<a int16><b uint8><a int32>").unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, SyncError::DuplicateField { field } if field == "a"));
    }

    #[test]
    fn test_oversized_repeat_count() {
        let err = Schema::parse("<a 9223372036854775808*int16>").unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, SyncError::FieldTooWide { field, scalar, .. }
            if field == "a" && scalar == ScalarType::Int16));

        // each field fits on its own but the record does not
        let half = usize::MAX / 2 + 1;
        let err = Schema::parse(&format!("<a {}*uint8><b {}*uint8>", half, half)).unwrap_err();
        assert!(matches!(err, SyncError::FieldTooWide { field, .. } if field == "b"));

        let err = Schema::parse("<a 99999999999999999999999*int16>").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_bad_repeat_specs() {
        for spec in ["<a 2*3>", "<a int16*x>", "<a *int16>", "<a 0*int16>"] {
            assert!(
                matches!(Schema::parse(spec), Err(SyncError::Format(_))),
                "{spec} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_spec() {
        assert!(matches!(Schema::parse("<>"), Err(SyncError::Format(_))));
    }
}
