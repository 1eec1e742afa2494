//! Password-change page.

use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use user_store::UserStore;

use crate::error::{ServerError, ServerResult};
use crate::forms::{
    FieldErrors, OLD_PASSWORD_ERROR, PasswordChangeSubmission, validate_password_change,
};
use crate::middleware::AuthenticatedUser;
use crate::pages::render::{field_row, page};
use crate::state::AppState;

fn password_page(errors: &FieldErrors) -> Html<String> {
    let body = format!(
        "<h1>Change password</h1>\n\
         <form method=\"post\" action=\"/accounts/password/\">\n\
         {old_password}{new_password1}{new_password2}\
         <p><button type=\"submit\">Change password</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        old_password = field_row("Old password", "old_password", "password", "", errors),
        new_password1 = field_row("New password", "new_password1", "password", "", errors),
        new_password2 = field_row(
            "New password confirmation",
            "new_password2",
            "password",
            "",
            errors
        ),
    );
    page("Change password", &body)
}

/// Renders the password-change form, or bounces anonymous visitors to the
/// login page.
pub async fn password_form(session: Option<Extension<AuthenticatedUser>>) -> Response {
    match session {
        Some(_) => password_page(&FieldErrors::new()).into_response(),
        None => Redirect::to("/accounts/login/").into_response(),
    }
}

/// Processes a password change for the signed-in user.
pub async fn password_submit<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: Option<Extension<AuthenticatedUser>>,
    Form(submission): Form<PasswordChangeSubmission>,
) -> ServerResult<Response> {
    let Some(Extension(session)) = session else {
        return Ok(Redirect::to("/accounts/login/").into_response());
    };

    let data = match validate_password_change(&submission) {
        Ok(data) => data,
        Err(errors) => return Ok(password_page(&errors).into_response()),
    };

    let user = state
        .store
        .get_user(session.id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("No user with id {}", session.id)))?;

    if !auth::verify_password(&data.old_password, &user.password_hash)? {
        let mut errors = FieldErrors::new();
        errors.add("old_password", OLD_PASSWORD_ERROR);
        return Ok(password_page(&errors).into_response());
    }

    let password_hash = auth::hash_password(&data.new_password)?;
    state.store.set_password_hash(user.id, &password_hash).await?;
    tracing::info!(id = user.id, username = %user.username, "Password changed");

    Ok(Redirect::to("/").into_response())
}
