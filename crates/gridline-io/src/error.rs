//! # Import/Export Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  csv::Error / io::Error                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ImportError / ExportError (this module) ← adds path and line context   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (gridline-host) ← serialized for the presentation             │
//! │                                                                         │
//! │  Per-record problems are NOT errors: they travel as RecordIssue         │
//! │  entries next to the rows that did import.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// File-level import failures. The store is left untouched when one occurs.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is empty or its first row has no usable header.
    #[error("CSV file has no header row")]
    MissingHeader,

    /// The header row is not valid UTF-8, or the reader hit an I/O fault.
    #[error("Malformed CSV{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Malformed { line: Option<u64>, message: String },

    /// The background task panicked or was cancelled by the runtime.
    #[error("Import task failed: {0}")]
    TaskFailed(String),
}

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export file could not be created or written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV writer failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// A problem with one record that did not stop the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIssue {
    /// 1-based line in the source file, when known.
    pub line: Option<u64>,
    pub kind: RecordIssueKind,
}

/// What went wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordIssueKind {
    /// Field count differs from the header. The record was padded or
    /// truncated and still imported.
    #[serde(rename_all = "camelCase")]
    FieldCount { expected: usize, found: usize },
    /// The record is not valid UTF-8 and was skipped.
    InvalidUtf8,
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        match &self.kind {
            RecordIssueKind::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            RecordIssueKind::InvalidUtf8 => write!(f, "record is not valid UTF-8 (skipped)"),
        }
    }
}

/// Convenience type alias for import results.
pub type ImportResult<T> = Result<T, ImportError>;

/// Convenience type alias for export results.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ImportError::Malformed {
            line: Some(3),
            message: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed CSV at line 3: bad header");

        let err = ImportError::Malformed {
            line: None,
            message: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed CSV: bad header");
    }

    #[test]
    fn test_record_issue_display() {
        let issue = RecordIssue {
            line: Some(4),
            kind: RecordIssueKind::FieldCount {
                expected: 4,
                found: 2,
            },
        };
        assert_eq!(issue.to_string(), "line 4: expected 4 fields, found 2");
    }
}
