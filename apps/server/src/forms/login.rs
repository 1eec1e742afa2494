//! Login form.

use serde::Deserialize;

use super::{FieldErrors, clean_password, clean_required};

/// Raw login submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginSubmission {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// A cleaned login attempt. Credential checking happens in the handler.
#[derive(Debug, Clone)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

/// Validates a login submission: both fields required, nothing more.
pub fn validate_login(submission: &LoginSubmission) -> Result<LoginData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = clean_required(&mut errors, "username", &submission.username);
    let password = clean_password(&mut errors, "password", &submission.password);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LoginData { username, password })
}
