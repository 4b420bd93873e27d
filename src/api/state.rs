//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains the store all request handlers read and write through.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new application state over the given store.
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates application state seeded from a loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        Ok(Self::new(config.seed()?))
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}
