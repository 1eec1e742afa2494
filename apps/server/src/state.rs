//! Application state.

use std::sync::Arc;

use auth::SessionManager;
use user_store::UserStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: UserStore> {
    /// Server configuration.
    pub config: Config,
    /// User store.
    pub store: S,
    /// Session token manager.
    pub sessions: SessionManager,
}

impl<S: UserStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S, sessions: SessionManager) -> Self {
        Self {
            config,
            store,
            sessions,
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config, store and session manager.
pub fn create_shared_state<S: UserStore>(
    config: Config,
    store: S,
    sessions: SessionManager,
) -> SharedState<S> {
    Arc::new(AppState::new(config, store, sessions))
}
