//! Password-change form.

use serde::Deserialize;

use super::{FieldErrors, PASSWORD_MISMATCH_ERROR, clean_password};

/// Raw password-change submission for a signed-in user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordChangeSubmission {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

/// A cleaned password change. The old password still needs verifying
/// against the stored hash; that requires the store and happens in the
/// handler.
#[derive(Debug, Clone)]
pub struct PasswordChangeData {
    pub old_password: String,
    pub new_password: String,
}

/// Validates a password change: all three fields required, new pair must
/// match.
pub fn validate_password_change(
    submission: &PasswordChangeSubmission,
) -> Result<PasswordChangeData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let old_password = clean_password(&mut errors, "old_password", &submission.old_password);
    let new_password1 = clean_password(&mut errors, "new_password1", &submission.new_password1);
    let new_password2 = clean_password(&mut errors, "new_password2", &submission.new_password2);

    if !new_password1.is_empty() && !new_password2.is_empty() && new_password1 != new_password2 {
        errors.add("new_password2", PASSWORD_MISMATCH_ERROR);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(PasswordChangeData {
        old_password,
        new_password: new_password1,
    })
}
