//! # Import Task
//!
//! Reads a CSV file in the background and hands back row drafts for the
//! store to import.
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  spawn_import(path, columns)                                            │
//! │       │                                                                 │
//! │       ├── tokio::fs::read            (async file read)                  │
//! │       ├── spawn_blocking(parse_csv)  (CPU-bound parse off the runtime)  │
//! │       ├── records_to_drafts          (header mapping + coercion)        │
//! │       ▼                                                                 │
//! │  ImportTask::join().await                                               │
//! │       ├── Ok(ImportBatch)   → caller dispatches import_drafts           │
//! │       └── Err(ImportError)  → store untouched                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The task never touches the store. Whoever awaits it decides whether the
//! batch is still wanted and applies it in one step.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gridline_core::types::{Column, RowDraft};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::adapter::records_to_drafts;
use crate::codec::parse_csv;
use crate::error::{ImportError, ImportResult, RecordIssue};

/// Identifies one import run in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImportTaskId(Uuid);

impl ImportTaskId {
    pub fn new() -> Self {
        ImportTaskId(Uuid::new_v4())
    }
}

impl Default for ImportTaskId {
    fn default() -> Self {
        ImportTaskId::new()
    }
}

impl fmt::Display for ImportTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Everything a finished import produced.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub task_id: ImportTaskId,
    pub source: PathBuf,
    pub drafts: Vec<RowDraft>,
    pub issues: Vec<RecordIssue>,
    /// CSV headers that matched no existing column.
    pub unknown_fields: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Handle to a running import.
#[derive(Debug)]
pub struct ImportTask {
    id: ImportTaskId,
    handle: JoinHandle<ImportResult<ImportBatch>>,
}

impl ImportTask {
    pub fn id(&self) -> ImportTaskId {
        self.id
    }

    /// Waits for the import to finish.
    pub async fn join(self) -> ImportResult<ImportBatch> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(ImportError::TaskFailed(err.to_string())),
        }
    }
}

/// Starts importing `path` on the current tokio runtime.
///
/// `columns` is a snapshot of the table's columns taken when the import was
/// requested; headers are resolved against it.
///
/// ## Panics
/// Must be called from within a tokio runtime.
pub fn spawn_import(path: impl Into<PathBuf>, columns: Vec<Column>) -> ImportTask {
    let id = ImportTaskId::new();
    let path = path.into();
    let handle = tokio::spawn(async move {
        let result = run_import(id, &path, columns).await;
        if let Err(err) = &result {
            error!(task_id = %id, path = %path.display(), error = %err, "Import failed");
        }
        result
    });
    ImportTask { id, handle }
}

async fn run_import(id: ImportTaskId, path: &Path, columns: Vec<Column>) -> ImportResult<ImportBatch> {
    let started_at = Utc::now();
    info!(task_id = %id, path = %path.display(), "Import started");

    let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = tokio::task::spawn_blocking(move || parse_csv(&bytes))
        .await
        .map_err(|err| ImportError::TaskFailed(err.to_string()))??;

    for issue in &parsed.issues {
        warn!(task_id = %id, %issue, "Skipped or repaired CSV record");
    }

    let mapped = records_to_drafts(&parsed, &columns);
    if !mapped.unknown_fields.is_empty() {
        warn!(
            task_id = %id,
            fields = ?mapped.unknown_fields,
            "CSV headers matched no column"
        );
    }

    let finished_at = Utc::now();
    info!(
        task_id = %id,
        rows = mapped.drafts.len(),
        issues = parsed.issues.len(),
        elapsed_ms = (finished_at - started_at).num_milliseconds(),
        "Import finished"
    );

    Ok(ImportBatch {
        task_id: id,
        source: path.to_path_buf(),
        drafts: mapped.drafts,
        issues: parsed.issues,
        unknown_fields: mapped.unknown_fields,
        started_at,
        finished_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
