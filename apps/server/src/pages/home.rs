//! Home page.

use std::sync::Arc;

use axum::{Extension, extract::State, response::Html};
use entities::User;
use user_store::UserStore;

use crate::error::ServerResult;
use crate::middleware::AuthenticatedUser;
use crate::pages::render::{escape, page};
use crate::state::AppState;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders the home page.
///
/// What the visitor sees depends entirely on whether the session
/// middleware attached an identity to the request.
pub async fn home_page<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: Option<Extension<AuthenticatedUser>>,
) -> ServerResult<Html<String>> {
    let user = match session {
        Some(Extension(session)) => state.store.get_user(session.id).await?,
        None => None,
    };

    Ok(match user {
        Some(user) => signed_in_page(&user),
        None => signed_out_page(),
    })
}

fn signed_out_page() -> Html<String> {
    page(
        "Home",
        "<p>You are not signed in.</p>\n\
         <p><a href=\"/accounts/login/\">Log in</a> or \
         <a href=\"/accounts/register/\">register</a>.</p>",
    )
}

fn signed_in_page(user: &User) -> Html<String> {
    let last_login = user
        .last_login
        .map(|at| at.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "never".to_string());

    let body = format!(
        "<p>You are logged in as the following user.</p>\n\
         <dl>\n\
         <dt>Username:</dt><dd>{username}</dd>\n\
         <dt>Name:</dt><dd>{name}</dd>\n\
         <dt>Position:</dt><dd>{position}</dd>\n\
         <dt>Email:</dt><dd>{email}</dd>\n\
         <dt>Date registered:</dt><dd>{date_joined}</dd>\n\
         <dt>Last logged in:</dt><dd>{last_login}</dd>\n\
         </dl>\n\
         <p><a href=\"/accounts/{id}/update/\">Edit profile</a> |\n\
         <a href=\"/accounts/password/\">Change password</a></p>\n\
         <form method=\"post\" action=\"/accounts/logout/\">\
         <button type=\"submit\">Log out</button></form>",
        username = escape(&user.username),
        name = escape(&user.full_name()),
        position = escape(user.position.as_deref().unwrap_or("")),
        email = escape(&user.email),
        date_joined = user.date_joined.format(DATE_FORMAT),
        id = user.id,
    );
    page("Home", &body)
}

#[cfg(test)]
mod tests {
    use entities::NewUser;
    use user_store::MemoryUserStore;

    use super::*;
    use crate::config::Config;
    use crate::create_state;
    use crate::state::SharedState;

    const LABELS: [&str; 6] = [
        "Username:",
        "Name:",
        "Position:",
        "Email:",
        "Date registered:",
        "Last logged in:",
    ];

    fn test_state() -> SharedState<MemoryUserStore> {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "memory".to_string(),
            session_secret: "test-secret-key-must-be-long-enough".to_string(),
            session_expiration_hours: 24,
            log_level: "info".to_string(),
        };
        create_state(config, MemoryUserStore::new())
    }

    async fn create_test_user(state: &SharedState<MemoryUserStore>) -> entities::User {
        state
            .store
            .create_user(
                NewUser::new("testuser", "hash", "Test", "User", "testuser@email.com")
                    .with_position("Tester"),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_page_when_signed_out() {
        let state = test_state();

        let Html(body) = home_page(State(state), None).await.unwrap();

        assert_eq!(body.matches("You are not signed in.").count(), 1);
        for label in LABELS {
            assert!(!body.contains(label), "unexpected label {label}");
        }
        assert!(!body.contains("You are logged in as the following user."));
    }

    #[tokio::test]
    async fn test_home_page_when_signed_in() {
        let state = test_state();
        let user = create_test_user(&state).await;
        state
            .store
            .record_login(user.id, chrono::Utc::now())
            .await
            .unwrap();

        let session = AuthenticatedUser {
            id: user.id,
            username: user.username.clone(),
        };
        let Html(body) = home_page(State(state), Some(Extension(session)))
            .await
            .unwrap();

        assert_eq!(
            body.matches("You are logged in as the following user.")
                .count(),
            1
        );
        for label in LABELS {
            assert_eq!(body.matches(label).count(), 1, "label {label}");
        }
        assert!(body.contains("<dd>testuser</dd>"));
        assert!(body.contains("<dd>Test User</dd>"));
        assert!(body.contains("<dd>Tester</dd>"));
        assert!(body.contains("<dd>testuser@email.com</dd>"));
        assert!(!body.contains("You are not signed in."));
        assert!(!body.contains("never"));
    }

    #[tokio::test]
    async fn test_home_page_before_first_login() {
        let state = test_state();
        let user = create_test_user(&state).await;

        let session = AuthenticatedUser {
            id: user.id,
            username: user.username.clone(),
        };
        let Html(body) = home_page(State(state), Some(Extension(session)))
            .await
            .unwrap();

        assert!(body.contains("<dt>Last logged in:</dt><dd>never</dd>"));
    }

    #[tokio::test]
    async fn test_home_page_with_stale_session() {
        // A session naming a user the store no longer has renders the
        // signed-out page rather than erroring.
        let state = test_state();

        let session = AuthenticatedUser {
            id: 999,
            username: "ghost".to_string(),
        };
        let Html(body) = home_page(State(state), Some(Extension(session)))
            .await
            .unwrap();

        assert_eq!(body.matches("You are not signed in.").count(), 1);
    }
}
