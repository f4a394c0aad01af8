//! # CSV Codec
//!
//! Turns CSV bytes into header-keyed records and back, using the `csv`
//! crate for quoting, escaping and line endings.
//!
//! ## Parse Rules
//! - The first row is the header. Header cells are trimmed.
//! - Blank lines are skipped.
//! - A record with the wrong field count is padded with empty fields or
//!   truncated, and reported as a [`RecordIssue`].
//! - A record that is not valid UTF-8 is skipped and reported.
//! - An empty file, or a header that is not valid UTF-8, fails the parse.

use std::io;

use crate::error::{ImportError, ImportResult, RecordIssue, RecordIssueKind};

// =============================================================================
// Records
// =============================================================================

/// One CSV record as ordered `(header, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    fields: Vec<(String, String)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        FlatRecord::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.push((header.into(), value.into()));
    }

    /// Value under `header`, if the record has that field.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Output of [`parse_csv`].
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub records: Vec<FlatRecord>,
    pub issues: Vec<RecordIssue>,
}

// =============================================================================
// Parse
// =============================================================================

/// Parses CSV bytes into header-keyed records.
///
/// ## Example
/// ```rust
/// use gridline_io::codec::parse_csv;
///
/// let parsed = parse_csv(b"Name,Age\nAlice,28\n").unwrap();
/// assert_eq!(parsed.headers, ["Name", "Age"]);
/// assert_eq!(parsed.records[0].get("Age"), Some("28"));
/// ```
pub fn parse_csv(input: &[u8]) -> ImportResult<ParsedCsv> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header_record = reader.byte_headers().map_err(malformed)?.clone();
    let header_record = csv::StringRecord::from_byte_record(header_record).map_err(|err| {
        ImportError::Malformed {
            line: Some(1),
            message: err.to_string(),
        }
    })?;

    let headers: Vec<String> = header_record
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::MissingHeader);
    }

    let mut parsed = ParsedCsv {
        headers,
        ..ParsedCsv::default()
    };

    for result in reader.byte_records() {
        let byte_record = result.map_err(malformed)?;
        let line = byte_record.position().map(|p| p.line());

        let record = match csv::StringRecord::from_byte_record(byte_record) {
            Ok(record) => record,
            Err(_) => {
                parsed.issues.push(RecordIssue {
                    line,
                    kind: RecordIssueKind::InvalidUtf8,
                });
                continue;
            }
        };

        let expected = parsed.headers.len();
        if record.len() != expected {
            parsed.issues.push(RecordIssue {
                line,
                kind: RecordIssueKind::FieldCount {
                    expected,
                    found: record.len(),
                },
            });
        }

        let mut flat = FlatRecord::new();
        for (index, header) in parsed.headers.iter().enumerate() {
            flat.push(header.as_str(), record.get(index).unwrap_or(""));
        }
        parsed.records.push(flat);
    }

    Ok(parsed)
}

fn malformed(err: csv::Error) -> ImportError {
    ImportError::Malformed {
        line: err.position().map(|p| p.line()),
        message: err.to_string(),
    }
}

// =============================================================================
// Write
// =============================================================================

/// Writes a header row followed by `records`, each laid out in header order.
///
/// Fields a record lacks are written empty. Lines end in CRLF.
pub fn write_records<W: io::Write>(
    writer: W,
    headers: &[String],
    records: &[FlatRecord],
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(headers)?;
    for record in records {
        writer.write_record(headers.iter().map(|h| record.get(h).unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
