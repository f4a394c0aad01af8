//! # Commands Module
//!
//! All commands exposed to the presentation layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── table.rs    ◄─── View, search, sort, paging, theme, JSON dispatch
//! ├── columns.rs  ◄─── Show/hide and add columns
//! ├── rows.rs     ◄─── Delete rows, edit cells
//! ├── io.rs       ◄─── CSV import and export
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation                                                           │
//! │  ────────────                                                           │
//! │  user clicks the "Age" header                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Host                                                              │
//! │  ─────────                                                              │
//! │  fn toggle_sort(                                                        │
//! │      table: &TableStoreState,  ◄── Managed state                       │
//! │      column_id: String,        ◄── From the event                      │
//! │  ) -> TableResponse                                                     │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Presentation receives: TableResponse                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs:
//! ```rust,ignore
//! fn add_column(table: &TableStoreState, label: String)
//! fn export_csv(table: &TableStoreState, config: &ConfigState)
//! fn get_config(config: &ConfigState)
//! ```

pub mod columns;
pub mod config;
pub mod io;
pub mod rows;
pub mod table;

pub use table::TableResponse;
