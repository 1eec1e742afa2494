//! Form validation.
//!
//! Each form is a pair of types: a raw submission deserialized from the
//! request body, and a cleaned, typed record produced by an explicit
//! `validate_*` function. Validation never touches the store; persistence
//! is a separate step taken by the page handlers. On failure the functions
//! return [`FieldErrors`], a mapping from field name to the human-readable
//! messages rendered next to that field.

mod login;
mod password_change;
mod profile;
mod registration;

pub use login::*;
pub use password_change::*;
pub use profile::*;
pub use registration::*;

use std::collections::BTreeMap;

use validator::ValidateEmail;

/// Message for a missing required field.
pub const REQUIRED_ERROR: &str = "This field is required.";

/// Message for an over-long name field.
pub const MAX_LENGTH_ERROR: &str = "Ensure this value has at most 150 characters.";

/// Message for a malformed email address.
pub const INVALID_EMAIL_ERROR: &str = "Enter a valid email address.";

/// Message for a password confirmation that does not match.
pub const PASSWORD_MISMATCH_ERROR: &str = "The two password fields didn't match.";

/// Message for a username that is already registered.
pub const USERNAME_TAKEN_ERROR: &str = "A user with that username already exists.";

/// Message for a failed login attempt.
pub const LOGIN_FAILED_ERROR: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Message for a wrong old password on the password-change form.
pub const OLD_PASSWORD_ERROR: &str =
    "Your old password was entered incorrectly. Please enter it again.";

/// Maximum length of the username and name fields.
pub const NAME_MAX_LENGTH: usize = 150;

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to a field's error list.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Returns the messages for a field, empty if it validated.
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if no field has errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Trims the value and records a required-field error if nothing is left.
fn clean_required(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED_ERROR);
    }
    value.to_string()
}

/// Required field capped at [`NAME_MAX_LENGTH`] characters.
fn clean_name(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let value = clean_required(errors, field, value);
    if value.chars().count() > NAME_MAX_LENGTH {
        errors.add(field, MAX_LENGTH_ERROR);
    }
    value
}

/// Required field that must parse as an email address.
fn clean_email(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let value = clean_required(errors, field, value);
    if !value.is_empty() && !value.validate_email() {
        errors.add(field, INVALID_EMAIL_ERROR);
    }
    value
}

/// Required field whose value must be kept verbatim (passwords).
fn clean_password(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    if value.is_empty() {
        errors.add(field, REQUIRED_ERROR);
    }
    value.to_string()
}
