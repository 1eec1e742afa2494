//! Login and logout.

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use user_store::UserStore;

use crate::error::ServerResult;
use crate::forms::{
    FieldErrors, LOGIN_FAILED_ERROR, LoginSubmission, validate_login,
};
use crate::middleware::SESSION_COOKIE;
use crate::pages::render::{escape, field_row, page};
use crate::state::AppState;

fn login_page(
    submission: &LoginSubmission,
    errors: &FieldErrors,
    failure: Option<&str>,
) -> Html<String> {
    let failure = match failure {
        Some(message) => format!(
            "<ul class=\"errorlist nonfield\"><li>{}</li></ul>\n",
            escape(message)
        ),
        None => String::new(),
    };
    let body = format!(
        "<h1>Log in</h1>\n\
         {failure}\
         <form method=\"post\" action=\"/accounts/login/\">\n\
         {username}{password}\
         <p><button type=\"submit\">Log in</button></p>\n\
         </form>\n\
         <p><a href=\"/accounts/register/\">Need an account? Register</a></p>",
        username = field_row("Username", "username", "text", &submission.username, errors),
        password = field_row("Password", "password", "password", "", errors),
    );
    page("Log in", &body)
}

/// Builds the session cookie carrying a freshly issued token.
fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Renders the empty login form.
pub async fn login_form() -> Html<String> {
    login_page(&LoginSubmission::default(), &FieldErrors::new(), None)
}

/// Processes a login attempt.
///
/// A wrong username, wrong password and deactivated account all produce
/// the same message; the page never says which part failed.
pub async fn login_submit<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    Form(submission): Form<LoginSubmission>,
) -> ServerResult<Response> {
    let data = match validate_login(&submission) {
        Ok(data) => data,
        Err(errors) => return Ok(login_page(&submission, &errors, None).into_response()),
    };

    let user = match state.store.get_user_by_username(&data.username).await? {
        Some(user) if user.is_active => user,
        _ => {
            return Ok(
                login_page(&submission, &FieldErrors::new(), Some(LOGIN_FAILED_ERROR))
                    .into_response(),
            );
        }
    };

    if !auth::verify_password(&data.password, &user.password_hash)? {
        return Ok(
            login_page(&submission, &FieldErrors::new(), Some(LOGIN_FAILED_ERROR))
                .into_response(),
        );
    }

    let token = state.sessions.issue_token(user.id, user.username.clone())?;
    state.store.record_login(user.id, Utc::now()).await?;
    tracing::info!(id = user.id, username = %user.username, "User logged in");

    Ok((jar.add(session_cookie(token)), Redirect::to("/")).into_response())
}

/// Clears the session cookie and returns to the login page.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");

    (jar.remove(cookie), Redirect::to("/accounts/login/"))
}
