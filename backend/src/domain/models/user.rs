use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account allowed to use the API.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const MIN_PASSWORD_LEN: usize = 6;

    pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
        let email = email.trim();
        let (local, domain) = email.split_once('@').ok_or(UserValidationError::InvalidEmail)?;
        let valid = !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !email.chars().any(char::is_whitespace)
            && domain.split('.').count() >= 2
            && domain.split('.').all(|part| !part.is_empty());
        if !valid {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
        if password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(UserValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// JWT payload issued on login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UserValidationError {
    #[error("Invalid e-mail address")]
    InvalidEmail,
    #[error("Password must have at least 6 characters")]
    PasswordTooShort,
    #[error("E-mail is already in use")]
    DuplicateEmail,
}
