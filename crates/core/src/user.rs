//! User accounts and the form rules guarding them.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::{Timestamp, UserId};

/// Default minimum password length.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

/// Minimum trimmed length of a full name.
pub const MIN_FULL_NAME_LENGTH: usize = 2;

/// Text the user must type to confirm account deletion.
pub const DELETE_CONFIRMATION: &str = "DELETE";

/// A registered user.
///
/// `password_hash` is a PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    pub bio: String,
    pub created_at: Timestamp,
}

/// Profile fields a user may edit. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// Canonical form used for storage and lookup: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !normalize_email(email).validate_email() {
        return Err(CoreError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> Result<(), CoreError> {
    if full_name.trim().chars().count() < MIN_FULL_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at least {MIN_FULL_NAME_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Check a sign-up form before anything touches the store.
pub fn validate_sign_up(
    email: &str,
    password: &str,
    full_name: &str,
    min_password_length: usize,
) -> Result<(), CoreError> {
    validate_email(email)?;
    validate_password_strength(password, min_password_length)?;
    validate_full_name(full_name)
}

/// Check the new password of a password change.
pub fn validate_new_password(
    new_password: &str,
    confirmation: &str,
    min_length: usize,
) -> Result<(), CoreError> {
    if new_password != confirmation {
        return Err(CoreError::Validation("Passwords do not match".to_string()));
    }
    validate_password_strength(new_password, min_length)
}

/// Validate the editable fields present in `update`.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), CoreError> {
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(full_name) = &update.full_name {
        validate_full_name(full_name)?;
    }
    Ok(())
}

pub fn confirm_account_deletion(confirmation: &str) -> Result<(), CoreError> {
    if confirmation != DELETE_CONFIRMATION {
        return Err(CoreError::Validation(format!(
            "Type \"{DELETE_CONFIRMATION}\" to confirm account deletion"
        )));
    }
    Ok(())
}
