//! Registration form.

use serde::Deserialize;

use super::{
    FieldErrors, PASSWORD_MISMATCH_ERROR, clean_email, clean_name, clean_password,
};

/// Raw registration submission, straight from the request body.
///
/// Every field defaults to empty so a partial post still binds; validation
/// reports the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationSubmission {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// A cleaned registration, ready for hashing and insertion.
///
/// `password` is the plaintext pair value; the caller hashes it and drops
/// this record.
#[derive(Debug, Clone)]
pub struct RegistrationData {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub email: String,
    pub password: String,
}

/// Validates a registration submission.
///
/// Every field is required. Names are capped at 150 characters, the email
/// must be well-formed, and the two password fields must match exactly.
/// Username uniqueness is not checked here; the store enforces it when the
/// record is persisted.
pub fn validate_registration(
    submission: &RegistrationSubmission,
) -> Result<RegistrationData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = clean_name(&mut errors, "username", &submission.username);
    let first_name = clean_name(&mut errors, "first_name", &submission.first_name);
    let last_name = clean_name(&mut errors, "last_name", &submission.last_name);
    let position = clean_name(&mut errors, "position", &submission.position);
    let email = clean_email(&mut errors, "email", &submission.email);
    let password1 = clean_password(&mut errors, "password1", &submission.password1);
    let password2 = clean_password(&mut errors, "password2", &submission.password2);

    if !password1.is_empty() && !password2.is_empty() && password1 != password2 {
        errors.add("password2", PASSWORD_MISMATCH_ERROR);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RegistrationData {
        username,
        first_name,
        last_name,
        position,
        email,
        password: password1,
    })
}
