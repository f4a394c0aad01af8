//! # Table Commands
//!
//! Search, sort, paging and theme. Every command returns the fresh
//! [`TableResponse`] so the presentation re-renders from one payload.

use gridline_core::validation::validate_page;
use gridline_core::{Column, PageInfo, Row, SortOrder, TableStore, Theme, Transition};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::TableStoreState;

/// Everything the grid needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    /// Rows on the current page, filtered and sorted
    pub rows: Vec<Row>,

    /// Columns to render, in order
    pub visible_columns: Vec<Column>,

    /// Every column, for the visibility toggles
    pub columns: Vec<Column>,

    pub page: PageInfo,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub rows_per_page: usize,
    pub search_query: String,
    pub sort_key: String,
    pub sort_order: SortOrder,
    pub theme: Theme,
}

impl From<&TableStore> for TableResponse {
    fn from(store: &TableStore) -> Self {
        let state = store.state();
        let view = store.view();
        TableResponse {
            rows: view.page_rows.iter().map(|&r| r.clone()).collect(),
            visible_columns: view.visible_columns.iter().map(|&c| c.clone()).collect(),
            columns: state.columns().to_vec(),
            page: view.page_info(),
            has_previous_page: view.has_previous_page(),
            has_next_page: view.has_next_page(),
            rows_per_page: state.rows_per_page(),
            search_query: state.search_query().to_string(),
            sort_key: state.sort_key().to_string(),
            sort_order: state.sort_order(),
            theme: state.theme(),
        }
    }
}

/// Applies one transition and returns the new view.
pub(crate) fn apply(table: &TableStoreState, transition: Transition) -> TableResponse {
    table.with_store_mut(|store| {
        let name = transition.name();
        let changed = store.dispatch(transition);
        debug!(transition = name, changed, "Transition applied");
        TableResponse::from(&*store)
    })
}

/// Gets the current view.
pub fn get_table(table: &TableStoreState) -> TableResponse {
    debug!("get_table command");
    table.with_store(|store| TableResponse::from(store))
}

/// Sets the search text. Paging restarts at page 1.
pub fn set_search_query(table: &TableStoreState, query: String) -> TableResponse {
    debug!(query = %query, "set_search_query command");
    apply(table, Transition::SetSearchQuery(query))
}

/// Sorts by a column. Clicking the current sort column flips the direction.
///
/// Any key is accepted; a key no column has leaves the row order alone.
///
/// ## Sort Cycle
/// ```text
/// click "Age" ──► age asc ──► click "Age" ──► age desc ──► click "Name" ──► name asc
/// ```
pub fn toggle_sort(table: &TableStoreState, column_id: String) -> TableResponse {
    debug!(column_id = %column_id, "toggle_sort command");
    apply(table, Transition::SetSort(column_id))
}

/// Jumps to a page. The page must exist.
pub fn set_current_page(table: &TableStoreState, page: usize) -> Result<TableResponse, ApiError> {
    debug!(page, "set_current_page command");

    table.with_store_mut(|store| -> Result<TableResponse, ApiError> {
        validate_page(page, store.view().total_pages)?;
        store.dispatch(Transition::SetCurrentPage(page));
        Ok(TableResponse::from(&*store))
    })
}

/// Moves one page forward. Does nothing on the last page.
pub fn next_page(table: &TableStoreState) -> TableResponse {
    debug!("next_page command");
    table.with_store_mut(|store| {
        let target = {
            let view = store.view();
            view.has_next_page().then(|| view.current_page + 1)
        };
        if let Some(page) = target {
            store.dispatch(Transition::SetCurrentPage(page));
        }
        TableResponse::from(&*store)
    })
}

/// Moves one page back. Does nothing on the first page.
pub fn previous_page(table: &TableStoreState) -> TableResponse {
    debug!("previous_page command");
    table.with_store_mut(|store| {
        let target = {
            let view = store.view();
            view.has_previous_page().then(|| view.current_page - 1)
        };
        if let Some(page) = target {
            store.dispatch(Transition::SetCurrentPage(page));
        }
        TableResponse::from(&*store)
    })
}

/// Switches between light and dark.
pub fn toggle_theme(table: &TableStoreState) -> TableResponse {
    debug!("toggle_theme command");
    apply(table, Transition::ToggleTheme)
}

/// Dispatches a serialized [`Transition`].
///
/// ## Example
/// ```rust
/// use gridline_host::commands::table::dispatch_json;
/// use gridline_host::state::TableStoreState;
///
/// let table = TableStoreState::default();
/// let response = dispatch_json(&table, r#"{"type":"setSearchQuery","payload":"designer"}"#).unwrap();
/// assert_eq!(response.page.total_filtered_count, 3);
/// ```
pub fn dispatch_json(table: &TableStoreState, payload: &str) -> Result<TableResponse, ApiError> {
    let transition: Transition = serde_json::from_str(payload)?;
    debug!(transition = transition.name(), "dispatch_json command");
    Ok(apply(table, transition))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn names(response: &TableResponse) -> Vec<&str> {
        response.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_get_table_initial_view() {
        let table = TableStoreState::default();
        let response = get_table(&table);

        assert_eq!(response.rows.len(), 10);
        assert_eq!(response.page.total_pages, 2);
        assert_eq!(response.page.range_start, 1);
        assert_eq!(response.page.range_end, 10);
        assert!(!response.has_previous_page);
        assert!(response.has_next_page);
        assert_eq!(response.sort_key, "name");
        assert_eq!(response.theme, Theme::Light);
    }

    #[test]
    fn test_search_then_sort_by_age() {
        let table = TableStoreState::default();
        set_search_query(&table, "developer".to_string());
        let response = toggle_sort(&table, "age".to_string());

        assert_eq!(names(&response), ["Alice Johnson", "Ethan Hunt", "Indiana Jones"]);
        let ages: Vec<f64> = response.rows.iter().map(|r| r.age).collect();
        assert_eq!(ages, [28.0, 38.0, 60.0]);

        let response = toggle_sort(&table, "age".to_string());
        assert_eq!(response.sort_order, SortOrder::Descending);
        assert_eq!(names(&response)[0], "Indiana Jones");
    }

    #[test]
    fn test_toggle_sort_unknown_key() {
        let table = TableStoreState::default();
        let before = get_table(&table);

        let response = toggle_sort(&table, "salary".to_string());
        assert_eq!(response.sort_key, "salary");
        assert_eq!(response.sort_order, SortOrder::Ascending);
        assert_eq!(names(&response), names(&before));
    }

    #[test]
    fn test_paging_stops_at_bounds() {
        let table = TableStoreState::default();

        let response = previous_page(&table);
        assert_eq!(response.page.current_page, 1);

        let response = next_page(&table);
        assert_eq!(response.page.current_page, 2);
        assert_eq!(names(&response), ["Kara Danvers", "Luke Skywalker"]);
        assert_eq!(response.page.range_start, 11);
        assert_eq!(response.page.range_end, 12);

        let response = next_page(&table);
        assert_eq!(response.page.current_page, 2);
    }

    #[test]
    fn test_set_current_page_is_validated() {
        let table = TableStoreState::default();

        assert!(set_current_page(&table, 2).is_ok());
        let err = set_current_page(&table, 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(set_current_page(&table, 0).is_err());

        assert_eq!(get_table(&table).page.current_page, 2);
    }

    #[test]
    fn test_search_resets_page() {
        let table = TableStoreState::default();
        next_page(&table);

        let response = set_search_query(&table, "a".to_string());
        assert_eq!(response.page.current_page, 1);
    }

    #[test]
    fn test_toggle_theme_twice() {
        let table = TableStoreState::default();
        assert_eq!(toggle_theme(&table).theme, Theme::Dark);
        assert_eq!(toggle_theme(&table).theme, Theme::Light);
    }

    #[test]
    fn test_dispatch_json() {
        let table = TableStoreState::default();

        let response = dispatch_json(&table, r#"{"type":"deleteRow","payload":1}"#).unwrap();
        assert_eq!(response.page.total_filtered_count, 11);

        let err = dispatch_json(&table, r#"{"type":"launchRocket"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let table = TableStoreState::default();
        let json = serde_json::to_value(get_table(&table)).unwrap();

        assert_eq!(json["page"]["totalPages"], 2);
        assert_eq!(json["sortOrder"], "asc");
        assert_eq!(json["visibleColumns"][0]["id"], "name");
    }
}
