//! # State Module
//!
//! Managed state for the host. Each command takes only the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │    TableStoreState       │      │      ConfigState         │        │
//! │  │                          │      │                          │        │
//! │  │  Arc<Mutex<TableStore>>  │      │  rows_per_page, theme    │        │
//! │  │  (rows, columns, query,  │      │  export dir / file name  │        │
//! │  │   sort, page, theme)     │      │  seed_sample_data        │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  ConfigState is read-only after startup; TableStoreState is the one    │
//! │  mutable thing the commands share.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod table;

pub use config::{
    ConfigError, ConfigState, CONFIG_FILE_NAME, ENV_CONFIG_PATH, ENV_EXPORT_DIR,
    ENV_ROWS_PER_PAGE, ENV_THEME,
};
pub use table::TableStoreState;
