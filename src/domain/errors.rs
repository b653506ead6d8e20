use thiserror::Error;

/// A single rejected login form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

/// Per-field errors collected from one login form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Please fix the errors in the form before submitting.")]
pub struct CredentialErrors {
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
}

impl CredentialErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

pub type ValidationResult<T> = Result<T, CredentialErrors>;
