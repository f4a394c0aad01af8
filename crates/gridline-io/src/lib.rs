//! # gridline-io: CSV Adapter for Gridline
//!
//! Moves rows between the table and CSV files. The store never sees a file
//! handle: imports produce [`RowDraft`](gridline_core::RowDraft)s that the
//! caller dispatches, and exports read a borrowed view of the state.
//!
//! ## Modules
//!
//! - [`codec`] - CSV bytes to header-keyed records and back
//! - [`adapter`] - Record ↔ row mapping (headers, coercion, labels)
//! - [`import`] - Background import task
//! - [`export`] - Export to a file or any writer
//! - [`error`] - Import/export errors and per-record issues

pub mod adapter;
pub mod codec;
pub mod error;
pub mod export;
pub mod import;

pub use error::{ExportError, ImportError, RecordIssue, RecordIssueKind};
pub use export::{export_csv, export_view, write_csv, ExportSummary, DEFAULT_EXPORT_FILE_NAME};
pub use import::{spawn_import, ImportBatch, ImportTask, ImportTaskId};
