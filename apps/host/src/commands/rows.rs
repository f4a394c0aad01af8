//! # Row Commands
//!
//! Deleting rows and editing cells.

use gridline_core::{parse_number, CellValue, ColumnKind, RowId, RowPatch, Transition};
use tracing::debug;

use super::table::{apply, TableResponse};
use crate::error::ApiError;
use crate::state::TableStoreState;

/// Deletes a row. An id that is not in the table changes nothing.
pub fn delete_row(table: &TableStoreState, id: RowId) -> TableResponse {
    debug!(id, "delete_row command");
    apply(table, Transition::DeleteRow(id))
}

/// Merges a patch into a row. The `id` key, if present, is ignored.
pub fn update_row(table: &TableStoreState, id: RowId, patch: RowPatch) -> TableResponse {
    debug!(id, fields = patch.len(), "update_row command");
    apply(table, Transition::UpdateRow { id, patch })
}

/// Commits an inline cell edit.
///
/// ## Coercion
/// The editor always sends text. Under a number column the text is parsed,
/// falling back to 0; under any other column it is stored as typed.
///
/// The column must exist, since its kind decides the coercion. A row id
/// that is not in the table changes nothing.
pub fn update_cell(
    table: &TableStoreState,
    id: RowId,
    column_id: String,
    value: String,
) -> Result<TableResponse, ApiError> {
    debug!(id, column_id = %column_id, "update_cell command");

    let kind = table
        .with_store(|store| store.state().column(&column_id).map(|c| c.kind))
        .ok_or_else(|| ApiError::not_found("Column", &column_id))?;

    let value = match kind {
        ColumnKind::Number => CellValue::Number(parse_number(&value).unwrap_or(0.0)),
        ColumnKind::Text => CellValue::Text(value),
    };
    let patch = RowPatch::new().set(column_id, value);
    Ok(apply(table, Transition::UpdateRow { id, patch }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::table::get_table;
    use crate::error::ErrorCode;

    fn row_age(table: &TableStoreState, id: RowId) -> Option<f64> {
        table.with_store(|store| store.state().row(id).map(|r| r.age))
    }

    #[test]
    fn test_update_then_delete() {
        let table = TableStoreState::default();

        update_row(&table, 1, RowPatch::new().set("age", 99));
        assert_eq!(row_age(&table, 1), Some(99.0));

        let response = delete_row(&table, 1);
        assert_eq!(response.page.total_filtered_count, 11);
        assert_eq!(row_age(&table, 1), None);
    }

    #[test]
    fn test_missing_row_leaves_table_unchanged() {
        let table = TableStoreState::default();
        let before = get_table(&table);

        assert_eq!(delete_row(&table, 999), before);
        assert_eq!(update_row(&table, 999, RowPatch::new().set("name", "X")), before);
        assert_eq!(
            update_cell(&table, 999, "age".to_string(), "41".to_string()).unwrap(),
            before
        );
    }

    #[test]
    fn test_update_cell_coerces_by_column_kind() {
        let table = TableStoreState::default();

        update_cell(&table, 2, "age".to_string(), " 41 ".to_string()).unwrap();
        assert_eq!(row_age(&table, 2), Some(41.0));

        update_cell(&table, 2, "age".to_string(), "forty".to_string()).unwrap();
        assert_eq!(row_age(&table, 2), Some(0.0));

        update_cell(&table, 2, "role".to_string(), "Lead".to_string()).unwrap();
        let role = table.with_store(|store| store.state().row(2).map(|r| r.role.clone()));
        assert_eq!(role.as_deref(), Some("Lead"));
    }

    #[test]
    fn test_update_cell_in_added_column() {
        let table = TableStoreState::default();
        crate::commands::columns::add_column(&table, "Department".to_string()).unwrap();

        update_cell(&table, 3, "department".to_string(), "Sales".to_string()).unwrap();

        let value = table.with_store(|store| {
            store.state().row(3).map(|r| r.display_value("department"))
        });
        assert_eq!(value.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_update_cell_unknown_column() {
        let table = TableStoreState::default();
        let err = update_cell(&table, 1, "salary".to_string(), "1".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
