//! Settings block at the top of every extracted data file.
//!
//! ```text
//! <Start settings>
//! Clock rate: 30000
//! Fields: <time uint32><voltage int16>
//! <End settings>
//! ```
//!
//! The binary payload starts right after the end sentinel line.

use crate::error::{Result, SyncError};
use std::collections::BTreeMap;

pub const START_SENTINEL: &str = "<Start settings>";
pub const END_SENTINEL: &str = "<End settings>";
const KEY_SEPARATOR: &str = ": ";
const FIELDS_KEY: &str = "fields";

#[derive(Debug, Clone)]
pub struct Header {
    /// Settings keyed by lower-cased name
    pub settings: BTreeMap<String, String>,
    /// Byte offset of the first payload byte
    pub payload_offset: usize,
}

impl Header {
    /// Parse the settings block from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut lines = Lines::new(bytes);

        let first = lines
            .next_line()?
            .ok_or_else(|| SyncError::format("not a recognized header: file is empty"))?;
        if first != START_SENTINEL {
            return Err(SyncError::format(format!(
                "not a recognized header: expected `{}`, found `{}`",
                START_SENTINEL, first
            )));
        }

        let mut settings = BTreeMap::new();
        loop {
            let line_no = lines.line_no;
            let line = lines.next_line()?.ok_or_else(|| {
                SyncError::format(format!("missing `{}` before end of file", END_SENTINEL))
            })?;

            if line == END_SENTINEL {
                break;
            }

            let (key, value) = line
                .split_once(KEY_SEPARATOR)
                .ok_or_else(|| SyncError::HeaderLine {
                    line: line_no + 1,
                    text: line.to_string(),
                })?;
            settings.insert(key.to_lowercase(), value.to_string());
        }

        if !settings.contains_key(FIELDS_KEY) {
            return Err(SyncError::format("header has no `fields` setting"));
        }

        Ok(Self {
            settings,
            payload_offset: lines.offset,
        })
    }

    /// Case-insensitive settings lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn fields_spec(&self) -> &str {
        self.get(FIELDS_KEY).unwrap_or_default()
    }

    /// Device clock rate, if the file records one. Informational only.
    pub fn clock_rate(&self) -> Option<u32> {
        self.get("clockrate")
            .or_else(|| self.get("clock rate"))
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Reads ASCII lines off the front of a byte buffer, tracking the offset.
struct Lines<'a> {
    bytes: &'a [u8],
    offset: usize,
    line_no: usize,
}

impl<'a> Lines<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line_no: 0,
        }
    }

    /// Next line with surrounding whitespace stripped, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<&'a str>> {
        if self.offset >= self.bytes.len() {
            return Ok(None);
        }

        let rest = &self.bytes[self.offset..];
        let (raw, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };

        if !raw.is_ascii() {
            return Err(SyncError::format(format!(
                "header line {} is not ASCII",
                self.line_no + 1
            )));
        }

        self.offset += consumed;
        self.line_no += 1;

        // ASCII was checked above, so this cannot fail
        let line = std::str::from_utf8(raw)
            .map_err(|e| SyncError::format(format!("header decode failed: {}", e)))?;
        Ok(Some(line.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &[u8] = b"<Start settings>\n\
        Description: Spike band\n\
        Clock rate: 30000\n\
        Fields: <time uint32>\n\
        <End settings>\n";

    #[test]
    fn test_parse_header() {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4]);

        let header = Header::parse(&bytes).unwrap();
        assert_eq!(header.payload_offset, HEADER.len());
        assert_eq!(header.get("Description"), Some("Spike band"));
        assert_eq!(header.fields_spec(), "<time uint32>");
        assert_eq!(header.clock_rate(), Some(30000));
    }

    #[test]
    fn test_crlf_lines() {
        let text = b"<Start settings>\r\nfields: <a int16>\r\n<End settings>\r\n\x00\x01";
        let header = Header::parse(text).unwrap();
        assert_eq!(header.payload_offset, text.len() - 2);
        assert_eq!(header.fields_spec(), "<a int16>");
    }

    #[test]
    fn test_value_keeps_later_separators() {
        let text = b"<Start settings>\nNote: a: b\nFields: <a int16>\n<End settings>\n";
        let header = Header::parse(text).unwrap();
        assert_eq!(header.get("note"), Some("a: b"));
    }

    #[test]
    fn test_bad_start_sentinel() {
        let err = Header::parse(b"<Begin>\nfields: <a int16>\n<End settings>\n").unwrap_err();
        assert!(matches!(err, SyncError::Format(msg) if msg.contains("not a recognized header")));
    }

    #[test]
    fn test_missing_separator() {
        let err =
            Header::parse(b"<Start settings>\nfields <a int16>\n<End settings>\n").unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, SyncError::HeaderLine { line: 2, text } if text == "fields <a int16>"));
    }

    #[test]
    fn test_missing_fields_key() {
        let err = Header::parse(b"<Start settings>\nclock rate: 1\n<End settings>\n").unwrap_err();
        assert!(matches!(err, SyncError::Format(msg) if msg.contains("fields")));
    }

    #[test]
    fn test_missing_end_sentinel() {
        let err = Header::parse(b"<Start settings>\nfields: <a int16>\n").unwrap_err();
        assert!(matches!(err, SyncError::Format(msg) if msg.contains("End settings")));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(Header::parse(b""), Err(SyncError::Format(_))));
    }
}
