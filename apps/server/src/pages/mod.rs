//! Page handlers.

pub mod home;
pub mod login;
pub mod password;
pub mod profile;
pub mod register;
pub mod render;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use user_store::UserStore;

use crate::state::AppState;

/// Creates the page router with all routes configured.
pub fn create_router<S: UserStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(home::home_page))
        .route(
            "/accounts/register/",
            get(register::register_form).post(register::register_submit),
        )
        .route(
            "/accounts/{id}/update/",
            get(profile::update_form).post(profile::update_submit),
        )
        .route(
            "/accounts/login/",
            get(login::login_form).post(login::login_submit),
        )
        .route("/accounts/logout/", post(login::logout))
        .route(
            "/accounts/password/",
            get(password::password_form).post(password::password_submit),
        )
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
