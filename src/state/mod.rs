//! Shared in-memory state: credential, session, and dedupe tables.

pub mod columns;
pub mod credentials;
pub mod dedupe;
pub mod session;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    dao::row_store::RowStore,
    state::{credentials::CredentialStore, dedupe::EventDedupe, session::SessionTracker},
};

/// Cheap-to-clone handle on the application state.
pub type SharedState = Arc<AppState>;

/// Central application state, constructed once in the composition root and
/// passed by reference into every request handler.
///
/// Each table sits behind its own lock. Lookups, whitelisted-field merges,
/// and insert-if-absent checks are read-modify-write sequences; callers
/// hold the owning lock across the whole sequence.
pub struct AppState {
    credentials: Mutex<CredentialStore>,
    sessions: Mutex<SessionTracker>,
    dedupe: Mutex<EventDedupe>,
    store: Arc<dyn RowStore>,
}

impl AppState {
    /// Build the shared state from configuration and a row store.
    pub fn new(config: AppConfig, store: Arc<dyn RowStore>) -> SharedState {
        Arc::new(Self {
            credentials: Mutex::new(CredentialStore::new(config.auth)),
            sessions: Mutex::new(SessionTracker::new()),
            dedupe: Mutex::new(EventDedupe::new()),
            store,
        })
    }

    /// Validation-key and bearer-token tables.
    pub fn credentials(&self) -> &Mutex<CredentialStore> {
        &self.credentials
    }

    /// Per-team active sessions and game counters.
    pub fn sessions(&self) -> &Mutex<SessionTracker> {
        &self.sessions
    }

    /// Processed-event key set.
    pub fn dedupe(&self) -> &Mutex<EventDedupe> {
        &self.dedupe
    }

    /// Handle to the configured row store.
    pub fn row_store(&self) -> Arc<dyn RowStore> {
        self.store.clone()
    }
}
