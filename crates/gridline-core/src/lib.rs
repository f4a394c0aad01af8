//! # gridline-core: Pure Table Logic for Gridline
//!
//! This crate is the **heart** of Gridline. It owns the table state, the
//! transitions that change it, and the derived view the presentation renders.
//! Nothing in here touches the file system, the clock or the environment.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gridline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation (external)                      │   │
//! │  │    Search box ──► Header click ──► Cell edit ──► Pager          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    gridline-host (commands)                     │   │
//! │  │    set_search_query, toggle_sort, add_column, import_csv ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gridline-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │   view    │  │ validation│  │   │
//! │  │   │   Row     │  │TableState │  │  filter   │  │   rules   │  │   │
//! │  │   │  Column   │  │Transition │  │  sort     │  │  checks   │  │   │
//! │  │   │ CellValue │  │TableStore │  │  paginate │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • TOTAL TRANSITIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    gridline-io (CSV adapter)                    │   │
//! │  │              codec, record mapping, import task, export         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Row, Column, CellValue and the small enums around them
//! - [`store`] - TableState, the Transition enum and the TableStore owner
//! - [`view`] - Derived view pipeline (filter → sort → paginate)
//! - [`validation`] - Checks the caller runs before dispatching
//! - [`seed`] - The sample dataset loaded at startup
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gridline_core::store::{TableStore, Transition};
//!
//! let mut store = TableStore::seeded();
//! store.dispatch(Transition::SetSearchQuery("developer".to_string()));
//! store.dispatch(Transition::SetSort("age".to_string()));
//!
//! let view = store.view();
//! let names: Vec<&str> = view.page_rows.iter().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, ["Alice Johnson", "Ethan Hunt", "Indiana Jones"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use store::{TableState, TableStore, Transition};
pub use types::*;
pub use view::{compute_view, DerivedView, PageInfo};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rows shown on one page unless configured otherwise.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Upper bound accepted for a configured page size.
pub const MAX_ROWS_PER_PAGE: usize = 500;

/// Longest column label accepted from the "add column" form.
pub const MAX_COLUMN_LABEL_LEN: usize = 64;

/// Column the table is sorted by at startup.
pub const DEFAULT_SORT_KEY: &str = "name";
