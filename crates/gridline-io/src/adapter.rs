//! # Record Mapping
//!
//! Maps parsed CSV records onto the table's columns, and table rows back
//! onto label-keyed records for export.
//!
//! ## Header Resolution
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  CSV header          Resolution                       Row key        │
//! │  ──────────          ──────────                       ───────        │
//! │  "id"            →   dropped (store assigns ids)      -              │
//! │  "email"         →   column id match                  email          │
//! │  "NAME"          →   column label (ignores case)      name           │
//! │  "Start Date"    →   derived id "start_date"          start_date     │
//! │  "Department"    →   no column: kept under derived    department     │
//! │                      id, reported as unknown                         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values under a numeric column go through [`parse_number`]; anything that
//! does not parse becomes 0. Everything else stays text.

use gridline_core::types::{derive_column_id, parse_number, CellValue, Column, Row, RowDraft};

use crate::codec::{FlatRecord, ParsedCsv};

/// Where one CSV header lands in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HeaderTarget {
    Skip,
    Field { key: String, numeric: bool },
}

/// Drafts built from a parse, plus the headers no column claimed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRecords {
    pub drafts: Vec<RowDraft>,
    pub unknown_fields: Vec<String>,
}

fn resolve_header(header: &str, columns: &[Column]) -> HeaderTarget {
    if header.is_empty() || header.eq_ignore_ascii_case("id") {
        return HeaderTarget::Skip;
    }

    match columns.iter().find(|c| c.matches_header(header)) {
        Some(column) => HeaderTarget::Field {
            key: column.id.clone(),
            numeric: column.is_numeric(),
        },
        None => HeaderTarget::Field {
            key: derive_column_id(header),
            numeric: false,
        },
    }
}

/// Converts parsed records into row drafts against `columns`.
///
/// Ids in the file are ignored; the store assigns fresh ones on import.
pub fn records_to_drafts(parsed: &ParsedCsv, columns: &[Column]) -> MappedRecords {
    let targets: Vec<HeaderTarget> = parsed
        .headers
        .iter()
        .map(|h| resolve_header(h, columns))
        .collect();

    let unknown_fields = parsed
        .headers
        .iter()
        .zip(&targets)
        .filter(|(_, target)| match target {
            HeaderTarget::Field { key, .. } => !columns.iter().any(|c| &c.id == key),
            HeaderTarget::Skip => false,
        })
        .map(|(header, _)| header.clone())
        .collect();

    let drafts = parsed
        .records
        .iter()
        .map(|record| record_to_draft(record, &parsed.headers, &targets))
        .collect();

    MappedRecords {
        drafts,
        unknown_fields,
    }
}

fn record_to_draft(record: &FlatRecord, headers: &[String], targets: &[HeaderTarget]) -> RowDraft {
    let mut draft = RowDraft::new();
    for (header, target) in headers.iter().zip(targets) {
        let HeaderTarget::Field { key, numeric } = target else {
            continue;
        };
        let raw = record.get(header).unwrap_or("");
        let value = if *numeric {
            CellValue::Number(parse_number(raw).unwrap_or(0.0))
        } else {
            CellValue::Text(raw.to_string())
        };
        draft.insert(key.clone(), value);
    }
    draft
}

/// Header row for an export: the labels of `columns`, in order.
pub fn export_headers(columns: &[&Column]) -> Vec<String> {
    columns.iter().map(|c| c.label.clone()).collect()
}

/// Converts rows to label-keyed records holding each cell's display string.
pub fn rows_to_records(rows: &[&Row], columns: &[&Column]) -> Vec<FlatRecord> {
    rows.iter()
        .map(|row| {
            let mut record = FlatRecord::new();
            for column in columns {
                record.push(column.label.as_str(), row.display_value(&column.id));
            }
            record
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
