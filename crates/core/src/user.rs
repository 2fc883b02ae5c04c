//! Account and profile validation.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum username length.
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 50;

/// Minimum password length enforced at signup.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate a signup username: length bounds, no whitespace.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate the fields required to finish onboarding.
pub fn validate_onboarding(fullname: &str, email: &str) -> Result<(), CoreError> {
    if fullname.trim().is_empty() {
        return Err(CoreError::Validation("fullname is required".to_string()));
    }
    validate_email(email)
}

/// Validate an optional latitude/longitude pair.
///
/// Both must be present together and within WGS84 bounds.
pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), CoreError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(CoreError::Validation(
                    "latitude/longitude out of range".to_string(),
                ));
            }
            Ok(())
        }
        _ => Err(CoreError::Validation(
            "latitude and longitude must be provided together".to_string(),
        )),
    }
}
