//! # Gridline Host Library
//!
//! The command layer a presentation calls into. It owns the single table
//! store, loads configuration and sets up logging.
//!
//! ## Module Organization
//! ```text
//! gridline_host/
//! ├── lib.rs          ◄─── You are here (startup & tracing)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── table.rs    ◄─── Shared table store
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── table.rs    ◄─── View, search, sort, paging, theme
//! │   ├── columns.rs  ◄─── Column visibility and creation
//! │   ├── rows.rs     ◄─── Row deletion and cell edits
//! │   ├── io.rs       ◄─── CSV import/export
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigError, ConfigState, TableStoreState};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,gridline=debug";

/// Everything a presentation needs to call commands.
#[derive(Debug, Clone)]
pub struct HostState {
    pub table: TableStoreState,
    pub config: ConfigState,
}

impl HostState {
    /// Builds the host state from an already-loaded configuration.
    pub fn new(config: ConfigState) -> Self {
        HostState {
            table: TableStoreState::from_config(&config),
            config,
        }
    }
}

/// Starts the host.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Host Startup                                      │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → gridline.toml → GRIDLINE_* environment                 │
/// │     • rows_per_page must be 1..=500                                     │
/// │                                                                         │
/// │  2. Initialize State ─────────────────────────────────────────────────► │
/// │     • TableStoreState: seeded 12-row table (unless disabled)            │
/// │     • ConfigState: read-only for the life of the process                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Call [`init_tracing`] first if log output is wanted.
pub fn bootstrap() -> Result<HostState, ConfigError> {
    let config = ConfigState::from_env()?;
    info!(
        rows_per_page = config.rows_per_page,
        theme = %config.theme,
        seed = config.seed_sample_data,
        "Starting Gridline host"
    );
    Ok(HostState::new(config))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gridline_io=trace` - Trace the CSV adapter only
/// - Default: `info,gridline=debug`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
