//! # Table Store State
//!
//! The single store the host owns, shared across commands.
//!
//! ## Locking
//! Each command takes the lock for one transition plus one view
//! computation. Imports snapshot the columns under the lock, release it
//! while the file is read, and take it again to apply the batch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gridline_core::seed::default_columns;
use gridline_core::{TableState, TableStore};

use super::ConfigState;

/// Thread-safe handle to the table store.
#[derive(Debug, Clone, Default)]
pub struct TableStoreState {
    store: Arc<Mutex<TableStore>>,
}

impl TableStoreState {
    pub fn new(store: TableStore) -> Self {
        TableStoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Builds the startup store from configuration.
    ///
    /// With sample data off, the table starts empty but keeps the default
    /// columns.
    pub fn from_config(config: &ConfigState) -> Self {
        let state = if config.seed_sample_data {
            TableState::seeded()
        } else {
            TableState::new(Vec::new(), default_columns())
        };
        let state = state
            .with_rows_per_page(config.rows_per_page)
            .with_theme(config.theme);
        TableStoreState::new(TableStore::new(state))
    }

    // Transitions cannot panic midway, so a poisoned lock still guards a
    // consistent store.
    fn lock(&self) -> MutexGuard<'_, TableStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// use gridline_host::state::TableStoreState;
    ///
    /// let table = TableStoreState::default();
    /// let count = table.with_store(|store| store.state().rows().len());
    /// assert_eq!(count, 12);
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TableStore) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TableStore) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::{Theme, Transition};

    #[test]
    fn test_from_config() {
        let config = ConfigState {
            rows_per_page: 5,
            theme: Theme::Dark,
            ..ConfigState::default()
        };
        let table = TableStoreState::from_config(&config);

        table.with_store(|store| {
            assert_eq!(store.state().rows().len(), 12);
            assert_eq!(store.state().rows_per_page(), 5);
            assert_eq!(store.state().theme(), Theme::Dark);
            assert_eq!(store.view().total_pages, 3);
        });
    }

    #[test]
    fn test_from_config_without_seed() {
        let config = ConfigState {
            seed_sample_data: false,
            ..ConfigState::default()
        };
        let table = TableStoreState::from_config(&config);

        table.with_store(|store| {
            assert!(store.state().rows().is_empty());
            assert_eq!(store.state().columns().len(), 4);
        });
    }

    #[test]
    fn test_clones_share_the_store() {
        let table = TableStoreState::default();
        let other = table.clone();

        other.with_store_mut(|store| store.dispatch(Transition::DeleteRow(1)));

        assert_eq!(table.with_store(|store| store.state().rows().len()), 11);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let table = TableStoreState::default();
        let other = table.clone();

        let result = std::thread::spawn(move || {
            other.with_store_mut(|_| panic!("command panicked"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(table.with_store(|store| store.state().rows().len()), 12);
    }
}
