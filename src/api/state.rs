//! Application state for the attendance API.
//!
//! The store sits behind an async mutex so that imports and holiday edits are applied
//! one at a time.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ConfigLoader;
use crate::reconciliation::AttendanceStore;

/// Shared application state.
///
/// Holds the loaded configuration and the attendance store that every handler reads
/// from and imports into.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<Mutex<AttendanceStore>>,
}

impl AppState {
    /// Creates a new state with an empty store seeded with the configured holidays.
    pub fn new(config: ConfigLoader) -> Self {
        let store = AttendanceStore::with_holidays(config.holidays().clone());
        Self::with_store(config, store)
    }

    /// Creates a new state around an existing store.
    pub fn with_store(config: ConfigLoader, store: AttendanceStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared attendance store.
    pub fn store(&self) -> &Mutex<AttendanceStore> {
        &self.store
    }
}
