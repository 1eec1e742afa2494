//! Registration page.

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use entities::NewUser;
use user_store::{UserStore, UserStoreError};

use crate::error::ServerResult;
use crate::forms::{
    FieldErrors, RegistrationSubmission, USERNAME_TAKEN_ERROR, validate_registration,
};
use crate::pages::render::{field_row, page};
use crate::state::AppState;

fn registration_page(submission: &RegistrationSubmission, errors: &FieldErrors) -> Html<String> {
    let body = format!(
        "<h1>Register</h1>\n\
         <form method=\"post\" action=\"/accounts/register/\">\n\
         {username}{first_name}{last_name}{position}{email}{password1}{password2}\
         <p><button type=\"submit\">Register</button></p>\n\
         </form>\n\
         <p><a href=\"/accounts/login/\">Already registered? Log in</a></p>",
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
        password1 = field_row("Password", "password1", "password", "", errors),
        password2 = field_row(
            "Password confirmation",
            "password2",
            "password",
            "",
            errors
        ),
    );
    page("Register", &body)
}

/// Renders the empty registration form.
pub async fn register_form() -> Html<String> {
    registration_page(&RegistrationSubmission::default(), &FieldErrors::new())
}

/// Processes a registration submission.
///
/// Nothing is persisted unless the whole submission validates; an invalid
/// post re-renders the form with its errors and creates no user.
pub async fn register_submit<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(submission): Form<RegistrationSubmission>,
) -> ServerResult<Response> {
    let data = match validate_registration(&submission) {
        Ok(data) => data,
        Err(errors) => return Ok(registration_page(&submission, &errors).into_response()),
    };

    if state
        .store
        .get_user_by_username(&data.username)
        .await?
        .is_some()
    {
        let mut errors = FieldErrors::new();
        errors.add("username", USERNAME_TAKEN_ERROR);
        return Ok(registration_page(&submission, &errors).into_response());
    }

    let password_hash = auth::hash_password(&data.password)?;
    let new_user = NewUser::new(
        data.username,
        password_hash,
        data.first_name,
        data.last_name,
        data.email,
    )
    .with_position(data.position);

    match state.store.create_user(new_user).await {
        Ok(user) => {
            tracing::info!(id = user.id, username = %user.username, "User registered");
            Ok(Redirect::to("/accounts/login/").into_response())
        }
        // Lost the race on the uniqueness constraint; same message as the
        // pre-check.
        Err(UserStoreError::UsernameTaken { .. }) => {
            let mut errors = FieldErrors::new();
            errors.add("username", USERNAME_TAKEN_ERROR);
            Ok(registration_page(&submission, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
