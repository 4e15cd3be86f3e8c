//! Application state management for Tauri.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::core::store::SessionStore;

/// Application state managed by Tauri.
///
/// Owns the session store behind an async mutex. The store belongs to this
/// state instance rather than any process-wide global, so a host embedding
/// several sessions gets one isolated store per state. Commands take the
/// lock, perform one synchronous pass over the store, and release it.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SessionStore>>,
}

impl AppState {
    /// Creates a new application state with a freshly seeded store.
    pub fn new() -> Self {
        debug!("Creating session state");
        Self {
            store: Arc::new(Mutex::new(SessionStore::new())),
        }
    }

    /// Locks the session store for the duration of one command.
    pub async fn store(&self) -> MutexGuard<'_, SessionStore> {
        self.store.lock().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
