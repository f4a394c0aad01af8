//! # Derived View Pipeline
//!
//! Computes the rows the presentation renders from the current
//! [`TableState`]. Nothing is cached: every read runs the full pipeline.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Derived View Pipeline                             │
//! │                                                                         │
//! │  state.rows (12)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. visible columns ── columns.filter(visible), original order          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. filter ─────────── any visible field contains query (case-folded)   │
//! │       │                "" passes everything                             │
//! │       ▼                                                                 │
//! │  3. sort ───────────── stable, by sort_key; null/absent always last     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. paginate ───────── [(page-1)*n, page*n) clamped, never an error     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DerivedView { page_rows, total_filtered_count, total_pages, range }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::store::TableState;
use crate::types::{CellValue, Column, Row, SortOrder};

// =============================================================================
// View Types
// =============================================================================

/// The rows and counts for one render.
///
/// Borrows from the state it was computed from; recompute after every
/// transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView<'a> {
    pub visible_columns: Vec<&'a Column>,
    pub page_rows: Vec<&'a Row>,
    pub total_filtered_count: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on the page ("Showing 1 to 10").
    pub range_start: usize,
    /// 1-based index of the last row on the page.
    pub range_end: usize,
    pub current_page: usize,
}

impl DerivedView<'_> {
    /// Counts and bounds without the borrowed rows.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_filtered_count: self.total_filtered_count,
            total_pages: self.total_pages,
            range_start: self.range_start,
            range_end: self.range_end,
        }
    }

    /// Whether a "previous page" action has somewhere to go.
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a "next page" action has somewhere to go.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Pager counts, detached from the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_filtered_count: usize,
    pub total_pages: usize,
    pub range_start: usize,
    pub range_end: usize,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs the full pipeline over `state`.
pub fn compute_view(state: &TableState) -> DerivedView<'_> {
    let visible_columns: Vec<&Column> = state.visible_columns().collect();
    let sorted = filter_and_sort(state, &visible_columns);

    let rows_per_page = state.rows_per_page().max(1);
    let total_filtered_count = sorted.len();
    let total_pages = total_filtered_count.div_ceil(rows_per_page);

    let (page_rows, range_start, range_end) =
        match state.current_page().checked_sub(1) {
            Some(page_index) => {
                let start = page_index.saturating_mul(rows_per_page);
                let end = start.saturating_add(rows_per_page);
                let page_rows = sorted
                    .get(start.min(total_filtered_count)..end.min(total_filtered_count))
                    .map(|slice| slice.to_vec())
                    .unwrap_or_default();
                (page_rows, start.saturating_add(1), end.min(total_filtered_count))
            }
            // Page 0 lies before the first page: nothing to show.
            None => (Vec::new(), 0, 0),
        };

    DerivedView {
        visible_columns,
        page_rows,
        total_filtered_count,
        total_pages,
        range_start,
        range_end,
        current_page: state.current_page(),
    }
}

/// Every row that passes the search, in sort order, with no pagination.
///
/// This is what export writes.
pub fn filtered_sorted_rows(state: &TableState) -> Vec<&Row> {
    let visible_columns: Vec<&Column> = state.visible_columns().collect();
    filter_and_sort(state, &visible_columns)
}

fn filter_and_sort<'a>(state: &'a TableState, visible_columns: &[&Column]) -> Vec<&'a Row> {
    let mut rows = filter_rows(state.rows(), visible_columns, state.search_query());
    sort_rows(&mut rows, state.sort_key(), state.sort_order());
    rows
}

/// Keeps rows where any visible column contains `query`, ignoring case.
///
/// Null and absent fields are searched as the empty string. An empty query
/// keeps every row.
pub fn filter_rows<'a>(rows: &'a [Row], visible_columns: &[&Column], query: &str) -> Vec<&'a Row> {
    if query.is_empty() {
        return rows.iter().collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            visible_columns
                .iter()
                .any(|column| row.display_value(&column.id).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort by the value under `key`.
///
/// Rows whose value is null or absent go after every defined value in both
/// directions, and keep their relative order.
pub fn sort_rows(rows: &mut Vec<&Row>, key: &str, order: SortOrder) {
    let mut keyed: Vec<(Option<CellValue>, &Row)> = rows
        .drain(..)
        .map(|row| (row.value(key).filter(|v| !v.is_null()), row))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_sort_values(a.as_ref(), b.as_ref(), order));

    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

/// Ordering between two sort keys; `None` means null or absent.
pub fn compare_sort_values(a: Option<&CellValue>, b: Option<&CellValue>, order: SortOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.natural_cmp(b),
            SortOrder::Descending => a.natural_cmp(b).reverse(),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
