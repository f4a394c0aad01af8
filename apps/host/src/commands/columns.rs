//! # Column Commands
//!
//! Showing, hiding and adding columns.

use gridline_core::validation::validate_column_label;
use gridline_core::Transition;
use tracing::debug;

use super::table::{apply, TableResponse};
use crate::error::ApiError;
use crate::state::TableStoreState;

/// Shows or hides a column. An unknown id changes nothing.
pub fn toggle_column_visibility(table: &TableStoreState, column_id: String) -> TableResponse {
    debug!(column_id = %column_id, "toggle_column_visibility command");
    apply(table, Transition::ToggleColumnVisibility(column_id))
}

/// Adds a visible text column.
///
/// ## Behavior
/// - The label is trimmed; an empty label is rejected
/// - The id is derived from the label (`"Start Date"` → `start_date`)
/// - A label whose id already exists changes nothing
/// - Existing rows have no value for the new column and show it blank
pub fn add_column(table: &TableStoreState, label: String) -> Result<TableResponse, ApiError> {
    debug!(label = %label, "add_column command");

    let label = validate_column_label(&label)?;
    Ok(apply(table, Transition::AddColumn(label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::table::get_table;
    use crate::error::ErrorCode;

    #[test]
    fn test_hide_and_show_column() {
        let table = TableStoreState::default();

        let response = toggle_column_visibility(&table, "email".to_string());
        let ids: Vec<&str> = response.visible_columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["name", "age", "role"]);
        assert_eq!(response.columns.len(), 4);

        let response = toggle_column_visibility(&table, "email".to_string());
        assert_eq!(response.visible_columns.len(), 4);
    }

    #[test]
    fn test_toggle_unknown_column_changes_nothing() {
        let table = TableStoreState::default();
        let before = get_table(&table);

        assert_eq!(toggle_column_visibility(&table, "salary".to_string()), before);
    }

    #[test]
    fn test_add_column() {
        let table = TableStoreState::default();

        let response = add_column(&table, "  Start Date ".to_string()).unwrap();
        let added = response.columns.last().unwrap();
        assert_eq!(added.id, "start_date");
        assert_eq!(added.label, "Start Date");
        assert!(added.visible);
        assert_eq!(response.rows[0].display_value("start_date"), "");
    }

    #[test]
    fn test_add_column_rejects_blank_label() {
        let table = TableStoreState::default();

        let err = add_column(&table, "   ".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            table.with_store(|store| store.state().columns().len()),
            4
        );
    }

    #[test]
    fn test_add_duplicate_column_changes_nothing() {
        let table = TableStoreState::default();
        let before = get_table(&table);

        let response = add_column(&table, "Email".to_string()).unwrap();
        assert_eq!(response, before);

        // Same derived id, different label.
        let response = add_column(&table, " EMAIL ".to_string()).unwrap();
        assert_eq!(response.columns.len(), 4);
        assert_eq!(response.columns[1].label, "Email");
    }
}
