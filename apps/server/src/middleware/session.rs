//! Session middleware.

use std::sync::Arc;

use auth::Claims;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use user_store::UserStore;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "staffbook_session";

/// Authenticated identity attached to a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User id.
    pub id: i64,
    /// Login name.
    pub username: String,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = auth::AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            username: claims.username,
        })
    }
}

/// Extracts the session token from the request's cookies.
fn extract_token(request: &Request) -> Option<String> {
    CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Session middleware.
///
/// Reads the session cookie, validates the token and stores the
/// authenticated user in the request extensions. Requests without a valid
/// session pass through unchanged; every page decides for itself what an
/// anonymous visitor sees. A token naming a deleted or deactivated account
/// counts as no session.
pub async fn attach_session<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&request) {
        if let Ok(claims) = state.sessions.validate_token(&token) {
            if let Ok(session) = AuthenticatedUser::try_from(claims) {
                match state.store.get_user(session.id).await {
                    Ok(Some(user)) if user.is_active => {
                        request.extensions_mut().insert(session);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Session user lookup failed");
                    }
                }
            }
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use entities::NewUser;
    use user_store::MemoryUserStore;

    use super::*;
    use crate::config::Config;
    use crate::create_state;
    use crate::state::SharedState;

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

    #[test]
    fn test_authenticated_user_from_claims() {
        let claims = Claims::new(7, "testuser".to_string(), 24);

        let user = AuthenticatedUser::try_from(claims).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "testuser");
    }

    #[test]
    fn test_extract_token_from_cookie_header() {
        let request = Request::builder()
            .header(COOKIE, format!("{SESSION_COOKIE}=some-token; other=1"))
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_token(&request), Some("some-token".to_string()));
    }

    #[test]
    fn test_extract_token_missing_cookie() {
        let request = Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_token(&request), None);
    }

    #[tokio::test]
    async fn test_session_attaches_for_active_user() {
        use axum::{Extension, Router, routing::get};
        use tower::ServiceExt;

        let state = test_state();
        let user = state
            .store
            .create_user(NewUser::new(
                "testuser",
                "hash",
                "Test",
                "User",
                "testuser@email.com",
            ))
            .await
            .unwrap();
        let token = state
            .sessions
            .issue_token(user.id, user.username.clone())
            .unwrap();

        async fn probe(session: Option<Extension<AuthenticatedUser>>) -> String {
            match session {
                Some(Extension(user)) => user.username,
                None => "anonymous".to_string(),
            }
        }

        let app = Router::new()
            .route("/probe", get(probe))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                attach_session::<MemoryUserStore>,
            ))
            .with_state(state);

        let request = Request::builder()
            .uri("/probe")
            .header(COOKIE, format!("{SESSION_COOKIE}={token}"))
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"testuser");

        // No cookie: anonymous
        let request = Request::builder()
            .uri("/probe")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"anonymous");
    }
}
