//! Profile-update page.

use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use user_store::{UserStore, UserStoreError};

use crate::error::{ServerError, ServerResult};
use crate::forms::{
    FieldErrors, ProfileUpdateSubmission, USERNAME_TAKEN_ERROR, validate_profile_update,
};
use crate::pages::render::{field_row, page};
use crate::state::AppState;

fn update_page(id: i64, submission: &ProfileUpdateSubmission, errors: &FieldErrors) -> Html<String> {
    let body = format!(
        "<h1>Edit profile</h1>\n\
         <form method=\"post\" action=\"/accounts/{id}/update/\">\n\
         {username}{first_name}{last_name}{position}{email}\
         <p><button type=\"submit\">Save</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        username = field_row("Username", "username", "text", &submission.username, errors),
        first_name = field_row(
            "First name",
            "first_name",
            "text",
            &submission.first_name,
            errors
        ),
        last_name = field_row(
            "Last name",
            "last_name",
            "text",
            &submission.last_name,
            errors
        ),
        position = field_row("Position", "position", "text", &submission.position, errors),
        email = field_row("Email", "email", "email", &submission.email, errors),
    );
    page("Edit profile", &body)
}

fn not_found(id: i64) -> ServerError {
    ServerError::NotFound(format!("No user with id {id}"))
}

/// Renders the profile-update form pre-filled from the addressed user.
pub async fn update_form<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<Html<String>> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(update_page(
        id,
        &ProfileUpdateSubmission::from_user(&user),
        &FieldErrors::new(),
    ))
}

/// Processes a profile update.
///
/// Only the submitted non-credential fields change; the stored password
/// hash is untouched. An invalid submission leaves the user unchanged.
pub async fn update_submit<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Form(submission): Form<ProfileUpdateSubmission>,
) -> ServerResult<Response> {
    if state.store.get_user(id).await?.is_none() {
        return Err(not_found(id));
    }

    let changes = match validate_profile_update(&submission) {
        Ok(changes) => changes,
        Err(errors) => return Ok(update_page(id, &submission, &errors).into_response()),
    };

    match state.store.update_profile(id, changes).await {
        Ok(user) => {
            tracing::info!(id = user.id, username = %user.username, "Profile updated");
            Ok(Redirect::to("/").into_response())
        }
        Err(UserStoreError::UsernameTaken { .. }) => {
            let mut errors = FieldErrors::new();
            errors.add("username", USERNAME_TAKEN_ERROR);
            Ok(update_page(id, &submission, &errors).into_response())
        }
        Err(UserStoreError::NotFound { .. }) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}
