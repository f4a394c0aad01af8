//! # Export
//!
//! Writes the rows the user is looking at to CSV.
//!
//! Export covers every row that survives the current filter and sort, not
//! just the visible page, and only the visible columns. Headers are column
//! labels, so a file exported here imports back cleanly.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use gridline_core::types::{Column, Row};
use gridline_core::view::filtered_sorted_rows;
use gridline_core::TableState;
use serde::Serialize;
use tracing::{error, info};

use crate::adapter::{export_headers, rows_to_records};
use crate::codec::write_records;
use crate::error::{ExportError, ExportResult};

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "user_data.csv";

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows_written: usize,
    pub columns_written: usize,
}

/// Writes `rows` under `columns` to any writer.
///
/// ## Example
/// ```rust
/// use gridline_core::seed::{default_columns, sample_rows};
/// use gridline_io::export::write_csv;
///
/// let rows = sample_rows();
/// let columns = default_columns();
/// let row_refs: Vec<_> = rows.iter().take(1).collect();
/// let column_refs: Vec<_> = columns.iter().collect();
///
/// let mut out = Vec::new();
/// write_csv(&mut out, &row_refs, &column_refs).unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with("Name,Email,Age,Role\r\n"));
/// ```
pub fn write_csv<W: Write>(writer: W, rows: &[&Row], columns: &[&Column]) -> ExportResult<()> {
    let headers = export_headers(columns);
    let records = rows_to_records(rows, columns);
    write_records(writer, &headers, &records)?;
    Ok(())
}

/// Writes `rows` under `columns` to `dir/file_name` and returns the path.
pub fn export_csv(
    dir: &Path,
    file_name: &str,
    rows: &[&Row],
    columns: &[&Column],
) -> ExportResult<PathBuf> {
    let path = dir.join(file_name);
    let write_err = |source: io::Error| ExportError::Write {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    if let Err(err) = write_csv(&mut writer, rows, columns) {
        error!(path = %path.display(), error = %err, "Export failed");
        return Err(err);
    }
    writer.flush().map_err(write_err)?;

    info!(path = %path.display(), rows = rows.len(), "Export written");
    Ok(path)
}

/// Exports the filtered and sorted rows of `state` under its visible
/// columns.
pub fn export_view(state: &TableState, dir: &Path, file_name: &str) -> ExportResult<ExportSummary> {
    let rows = filtered_sorted_rows(state);
    let columns: Vec<&Column> = state.visible_columns().collect();
    let path = export_csv(dir, file_name, &rows, &columns)?;

    Ok(ExportSummary {
        path,
        rows_written: rows.len(),
        columns_written: columns.len(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
