//! Staffbook server.
//!
//! A small server-rendered web application for staff accounts:
//! self-service registration, an authentication-aware home page, profile
//! editing and password changes. All state lives in a [`user_store`]
//! backend; each request is handled independently.

pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod pages;
pub mod state;

use std::sync::Arc;

use auth::{SessionConfig, SessionManager};
use axum::Router;
use tower_http::trace::TraceLayer;
use user_store::UserStore;

use crate::config::Config;
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: UserStore + 'static>(state: Arc<AppState<S>>) -> Router {
    pages::create_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::attach_session::<S>,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: UserStore>(config: Config, store: S) -> Arc<AppState<S>> {
    let sessions = SessionManager::new(
        SessionConfig::new(&config.session_secret)
            .with_expiration_hours(config.session_expiration_hours),
    );

    create_shared_state(config, store, sessions)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
