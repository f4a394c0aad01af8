//! # Table State Store
//!
//! The single source of truth for the grid: rows, columns and all view
//! state (search, sort, page, theme).
//!
//! ## Transition Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Table State Transitions                              │
//! │                                                                         │
//! │  User Action              Transition                 State Change       │
//! │  ───────────              ──────────                 ────────────       │
//! │                                                                         │
//! │  Type in search ────────► SetSearchQuery ──────────► query, page = 1   │
//! │  Click header ──────────► SetSort ─────────────────► key / flip order  │
//! │  Next / Previous ───────► SetCurrentPage ──────────► page (no clamp)   │
//! │  Tick checkbox ─────────► ToggleColumnVisibility ──► column.visible    │
//! │  "Add column" ──────────► AddColumn ───────────────► columns.push      │
//! │  Pick CSV file ─────────► ImportData ──────────────► rows = batch      │
//! │  Confirm delete ────────► DeleteRow ───────────────► rows.retain       │
//! │  Edit cell ─────────────► UpdateRow ───────────────► shallow merge     │
//! │  Theme button ──────────► ToggleTheme ─────────────► light ↔ dark      │
//! │                                                                         │
//! │  NOTE: Every transition is total. Unknown ids and duplicate column     │
//! │        ids are absorbed as no-ops, never reported as errors.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Each transition takes `&mut TableState` and finishes before returning,
//! so no caller can observe a half-applied change.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::seed;
use crate::types::{Column, Row, RowDraft, RowId, RowPatch, SortOrder, Theme};
use crate::view::{self, DerivedView};
use crate::{DEFAULT_ROWS_PER_PAGE, DEFAULT_SORT_KEY};

// =============================================================================
// Table State
// =============================================================================

/// The whole in-memory state of the grid.
///
/// Fields are private: the only way to change them is through the
/// transition methods below (or [`TableState::apply`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    rows: Vec<Row>,
    columns: Vec<Column>,
    search_query: String,
    sort_key: String,
    sort_order: SortOrder,
    current_page: usize,
    rows_per_page: usize,
    theme: Theme,
    /// Next id handed out by [`TableState::allocate_row_id`].
    next_row_id: RowId,
}

impl TableState {
    /// Creates a state over the given rows and columns with default view
    /// settings (sorted by name ascending, page 1, light theme).
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        let next_row_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        TableState {
            rows,
            columns,
            search_query: String::new(),
            sort_key: DEFAULT_SORT_KEY.to_string(),
            sort_order: SortOrder::Ascending,
            current_page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            theme: Theme::Light,
            next_row_id,
        }
    }

    /// The startup state: twelve sample rows and the four base columns.
    pub fn seeded() -> Self {
        TableState::new(seed::sample_rows(), seed::default_columns())
    }

    /// Sets the page size. Callers validate it first
    /// (see [`crate::validation::validate_rows_per_page`]).
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    /// Sets the starting theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Looks up a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Looks up a column by id.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Visible columns in their original order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replaces the search query and goes back to page 1.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.current_page = 1;
    }

    /// Sorts by `key`; the same key again flips the direction.
    ///
    /// The current page is kept.
    pub fn set_sort(&mut self, key: &str) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key.to_string();
            self.sort_order = SortOrder::Ascending;
        }
    }

    /// Sets the current page without clamping.
    ///
    /// Bounds are the caller's job (see [`crate::validation::validate_page`]);
    /// an out-of-range page simply renders empty.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Flips visibility of a column. Returns false if no such column.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.id == column_id) {
            Some(column) => {
                column.visible = !column.visible;
                true
            }
            None => false,
        }
    }

    /// Appends a visible text column derived from `label`.
    ///
    /// Returns false (and changes nothing) when a column with the derived id
    /// already exists. Empty labels are not rejected here; the caller runs
    /// [`crate::validation::validate_column_label`] first.
    pub fn add_column(&mut self, label: &str) -> bool {
        let column = Column::new(label);
        if self.column(&column.id).is_some() {
            return false;
        }
        self.columns.push(column);
        true
    }

    /// Replaces every row with `rows` and goes back to page 1.
    ///
    /// Rows keep their ids, except when an id repeats one earlier in the
    /// batch: that row gets an id no other row in the batch holds. The id
    /// counter is moved past the largest imported id.
    pub fn import_data(&mut self, rows: Vec<Row>) {
        if let Some(max_id) = rows.iter().map(|r| r.id).max() {
            self.next_row_id = self.next_row_id.max(max_id.saturating_add(1));
        }

        let mut taken: HashSet<RowId> = rows.iter().map(|r| r.id).collect();
        let mut seen = HashSet::with_capacity(rows.len());
        let mut imported = Vec::with_capacity(rows.len());
        for mut row in rows {
            if !seen.insert(row.id) {
                row.id = self.allocate_unused_row_id(&taken);
                taken.insert(row.id);
                seen.insert(row.id);
            }
            imported.push(row);
        }

        self.rows = imported;
        self.current_page = 1;
    }

    /// Gives each draft a fresh id, then imports the batch.
    ///
    /// Ids come from the store's counter, so they are unique across every
    /// import for the life of the process, not just within this batch. Once
    /// the counter reaches `u64::MAX` they are only unique within the batch.
    pub fn import_drafts(&mut self, drafts: Vec<RowDraft>) {
        let rows: Vec<Row> = drafts
            .into_iter()
            .map(|draft| {
                let id = self.allocate_row_id();
                draft.into_row(id)
            })
            .collect();
        self.import_data(rows);
    }

    /// Removes the row with `id`. Returns false if it was not there.
    pub fn delete_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    /// Shallow-merges `patch` into the row with `id`.
    ///
    /// Returns false if the row was not there.
    pub fn update_row(&mut self, id: RowId, patch: &RowPatch) -> bool {
        match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Flips light ↔ dark.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Applies a named transition. Returns false when it was absorbed as a
    /// no-op (unknown row or column id, duplicate column).
    pub fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::SetSearchQuery(query) => self.set_search_query(query),
            Transition::SetSort(key) => self.set_sort(&key),
            Transition::SetCurrentPage(page) => self.set_current_page(page),
            Transition::ToggleColumnVisibility(id) => return self.toggle_column_visibility(&id),
            Transition::AddColumn(label) => return self.add_column(&label),
            Transition::ImportData(rows) => self.import_data(rows),
            Transition::DeleteRow(id) => return self.delete_row(id),
            Transition::UpdateRow { id, patch } => return self.update_row(id, &patch),
            Transition::ToggleTheme => self.toggle_theme(),
        }
        true
    }

    fn allocate_row_id(&mut self) -> RowId {
        let id = self.next_row_id;
        self.next_row_id = self.next_row_id.saturating_add(1);
        id
    }

    fn allocate_unused_row_id(&mut self, taken: &HashSet<RowId>) -> RowId {
        while self.next_row_id < RowId::MAX {
            let id = self.allocate_row_id();
            if !taken.contains(&id) {
                return id;
            }
        }
        // Counter exhausted: fall back to the lowest free id.
        (1..=RowId::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or(RowId::MAX)
    }
}

impl Default for TableState {
    fn default() -> Self {
        TableState::seeded()
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Every operation the presentation can dispatch.
///
/// ## Wire Shape
/// ```json
/// { "type": "setSort", "payload": "age" }
/// { "type": "updateRow", "payload": { "id": 1, "patch": { "age": 99 } } }
/// { "type": "toggleTheme" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Transition {
    SetSearchQuery(String),
    SetSort(String),
    SetCurrentPage(usize),
    ToggleColumnVisibility(String),
    AddColumn(String),
    ImportData(Vec<Row>),
    DeleteRow(RowId),
    UpdateRow { id: RowId, patch: RowPatch },
    ToggleTheme,
}

impl Transition {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Transition::SetSearchQuery(_) => "set_search_query",
            Transition::SetSort(_) => "set_sort",
            Transition::SetCurrentPage(_) => "set_current_page",
            Transition::ToggleColumnVisibility(_) => "toggle_column_visibility",
            Transition::AddColumn(_) => "add_column",
            Transition::ImportData(_) => "import_data",
            Transition::DeleteRow(_) => "delete_row",
            Transition::UpdateRow { .. } => "update_row",
            Transition::ToggleTheme => "toggle_theme",
        }
    }
}

// =============================================================================
// Table Store
// =============================================================================

/// Owner of one [`TableState`].
///
/// The host keeps exactly one of these and hands out references; there is
/// no global store.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    state: TableState,
}

impl TableStore {
    pub fn new(state: TableState) -> Self {
        TableStore { state }
    }

    /// A store holding the seeded sample data.
    pub fn seeded() -> Self {
        TableStore::new(TableState::seeded())
    }

    /// Read accessor for the current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Applies a transition. See [`TableState::apply`].
    pub fn dispatch(&mut self, transition: Transition) -> bool {
        self.state.apply(transition)
    }

    /// Imports id-less rows, assigning ids from the store counter.
    pub fn import_drafts(&mut self, drafts: Vec<RowDraft>) {
        self.state.import_drafts(drafts);
    }

    /// Recomputes the derived view from the current state.
    pub fn view(&self) -> DerivedView<'_> {
        view::compute_view(&self.state)
    }

    pub fn into_state(self) -> TableState {
        self.state
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
