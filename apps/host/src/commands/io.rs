//! # Import/Export Commands
//!
//! ## Import Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  import_csv(path)                                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  1. Lock, copy the columns, unlock                                      │
//! │  2. spawn_import(path, columns).join().await   (store not locked)       │
//! │  3. Ok  → lock, import_drafts (rows replaced, page reset to 1)          │
//! │     Err → ApiError, store untouched                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions dispatched while an import is in flight still apply; the
//! import then replaces the rows they touched.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use gridline_io::{export_view, spawn_import, ExportSummary, ImportTaskId, RecordIssue};
use serde::Serialize;
use tracing::{debug, info};

use super::table::TableResponse;
use crate::error::ApiError;
use crate::state::{ConfigState, TableStoreState};

/// Result of a successful import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub task_id: ImportTaskId,
    pub imported: usize,
    pub issues: Vec<RecordIssue>,
    pub unknown_fields: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub table: TableResponse,
}

/// Replaces all rows with the contents of a CSV file.
pub async fn import_csv(table: &TableStoreState, path: PathBuf) -> Result<ImportResponse, ApiError> {
    debug!(path = %path.display(), "import_csv command");

    let columns = table.with_store(|store| store.state().columns().to_vec());
    let batch = spawn_import(path, columns).join().await?;

    let imported = batch.drafts.len();
    let response = table.with_store_mut(|store| {
        store.import_drafts(batch.drafts);
        TableResponse::from(&*store)
    });
    info!(task_id = %batch.task_id, rows = imported, "Import applied");

    Ok(ImportResponse {
        task_id: batch.task_id,
        imported,
        issues: batch.issues,
        unknown_fields: batch.unknown_fields,
        started_at: batch.started_at,
        finished_at: batch.finished_at,
        table: response,
    })
}

/// Writes the filtered, sorted rows under the visible columns to the
/// configured export file.
pub fn export_csv(table: &TableStoreState, config: &ConfigState) -> Result<ExportSummary, ApiError> {
    debug!(dir = %config.export_dir.display(), "export_csv command");

    let summary = table.with_store(|store| {
        export_view(store.state(), &config.export_dir, &config.export_file_name)
    })?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::table::{next_page, set_search_query};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_import_replaces_rows_and_resets_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(
            &path,
            "id,Name,Email,Age,Role,Team\n\
             5,Zed,z@x.com,51,Ops,Blue\n\
             5,Yan,y@x.com,oops,Dev,Red\n",
        )
        .unwrap();

        let table = TableStoreState::default();
        next_page(&table);

        let response = import_csv(&table, path).await.unwrap();

        assert_eq!(response.imported, 2);
        assert_eq!(response.unknown_fields, ["Team"]);
        assert_eq!(response.table.page.current_page, 1);
        assert_eq!(response.table.page.total_filtered_count, 2);

        let ids: Vec<u64> = response.table.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert!(ids.iter().all(|&id| id > 12));
        assert_eq!(response.table.rows[0].name, "Yan");
        assert_eq!(response.table.rows[0].age, 0.0);
        assert!(response.finished_at >= response.started_at);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["startedAt"].is_string());
        assert!(json["finishedAt"].is_string());
    }

    #[tokio::test]
    async fn test_failed_import_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let table = TableStoreState::default();
        let before = table.with_store(|store| store.state().clone());

        let err = import_csv(&table, dir.path().join("missing.csv"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ImportFailed);
        assert_eq!(table.with_store(|store| store.state().clone()), before);
    }

    #[test]
    fn test_export_uses_config_location() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            export_dir: dir.path().to_path_buf(),
            ..ConfigState::default()
        };
        let table = TableStoreState::default();
        set_search_query(&table, "manager".to_string());

        let summary = export_csv(&table, &config).unwrap();

        assert_eq!(summary.path, dir.path().join("user_data.csv"));
        assert_eq!(summary.rows_written, 3);
    }

    #[test]
    fn test_export_failure_maps_to_api_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            export_dir: dir.path().join("missing"),
            ..ConfigState::default()
        };

        let err = export_csv(&TableStoreState::default(), &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
