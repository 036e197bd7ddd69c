use thiserror::Error;

use crate::backend::BackendError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Pre-I/O input problems, surfaced inline next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("enter your name")]
    NameRequired,
}

/// The small set of user-facing authentication failures. Everything a remote
/// backend can report collapses into one of these for direct display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("too many attempts, try again in a moment")]
    RateLimited,
    #[error("confirm your email address to continue")]
    EmailNotConfirmed,
    #[error("{0}")]
    Unknown(String),
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = domain.split('.').count() >= 2 && domain.split('.').all(|part| !part.is_empty());
    if local.is_empty() || !domain_ok {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_password(password)
}

pub fn validate_sign_up(email: &str, password: &str, display_name: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_password(password)?;
    if display_name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match &err {
            BackendError::Api { status, message } => {
                let lowered = message.to_ascii_lowercase();
                if *status == 429 || lowered.contains("rate limit") {
                    AuthError::RateLimited
                } else if lowered.contains("not confirmed") || lowered.contains("confirm your email")
                {
                    AuthError::EmailNotConfirmed
                } else if matches!(status, 400 | 401 | 403)
                    && (lowered.contains("invalid") || lowered.contains("credential"))
                {
                    AuthError::InvalidCredentials
                } else {
                    AuthError::Unknown(message.clone())
                }
            }
            _ => AuthError::Unknown(err.to_string()),
        }
    }
}
