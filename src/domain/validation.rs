//! Login form checks.
//!
//! These run in front of the session and never reach it: a form that fails
//! here is rejected before `login` is called.

use super::errors::{CredentialErrors, ValidationError, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length, counted in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        Err(ValidationError::EmailRequired)
    } else if !is_valid_email(email) {
        Err(ValidationError::InvalidEmail)
    } else {
        Ok(())
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        Err(ValidationError::PasswordRequired)
    } else if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        })
    } else {
        Ok(())
    }
}

/// Checks both fields and reports every failure, not just the first.
///
/// # Examples
///
/// ```
/// use captrack::domain::{validate_credentials, ValidationError};
///
/// assert!(validate_credentials("student@uc.edu.ph", "student123").is_ok());
///
/// let errors = validate_credentials("not-an-email", "123").unwrap_err();
/// assert_eq!(errors.email, Some(ValidationError::InvalidEmail));
/// assert_eq!(errors.password, Some(ValidationError::PasswordTooShort { min: 6 }));
/// ```
pub fn validate_credentials(email: &str, password: &str) -> ValidationResult<()> {
    let errors = CredentialErrors {
        email: validate_email(email).err(),
        password: validate_password(password).err(),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
