//! Profile-update form.

use entities::ProfileChanges;
use serde::Deserialize;

use super::{FieldErrors, clean_email, clean_name};

/// Raw profile-update submission: the registration field set minus the
/// password pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateSubmission {
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
}

impl ProfileUpdateSubmission {
    /// Pre-fills a submission from an existing user, for rendering the
    /// edit form.
    pub fn from_user(user: &entities::User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            position: user.position.clone().unwrap_or_default(),
            email: user.email.clone(),
        }
    }
}

/// Validates a profile update.
///
/// All fields are required at the form level even though the entity allows
/// a null position. Uniqueness of the username is left to the store.
pub fn validate_profile_update(
    submission: &ProfileUpdateSubmission,
) -> Result<ProfileChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = clean_name(&mut errors, "username", &submission.username);
    let first_name = clean_name(&mut errors, "first_name", &submission.first_name);
    let last_name = clean_name(&mut errors, "last_name", &submission.last_name);
    let position = clean_name(&mut errors, "position", &submission.position);
    let email = clean_email(&mut errors, "email", &submission.email);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProfileChanges {
        username,
        first_name,
        last_name,
        email,
        position: Some(position),
    })
}
