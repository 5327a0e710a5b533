use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::users::{RegisterUserCommand, UpdateUserCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{User, UserValidationError};
use crate::storage::UserStorage;

/// Hash a password with Argon2 and a random salt
pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> DomainResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| DomainError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Service for API user accounts
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStorage>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStorage>) -> Self {
        Self { users }
    }

    pub async fn register(&self, command: RegisterUserCommand) -> DomainResult<User> {
        let email = command.email.trim().to_lowercase();
        info!("Registering user {}", email);

        User::validate_email(&email)?;
        User::validate_password(&command.password)?;
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(UserValidationError::DuplicateEmail.into());
        }

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            password_hash: hash_password(&command.password)?,
            created_at: now,
            updated_at: now,
        };
        Ok(self.users.save_user(&user).await?)
    }

    pub async fn update(&self, command: UpdateUserCommand) -> DomainResult<User> {
        info!("Updating user {}", command.user_id);

        let mut user = self
            .users
            .get_user(&command.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", &command.user_id))?;

        let email = command.email.trim().to_lowercase();
        User::validate_email(&email)?;
        User::validate_password(&command.password)?;
        if let Some(existing) = self.users.find_user_by_email(&email).await? {
            if existing.id != user.id {
                return Err(UserValidationError::DuplicateEmail.into());
            }
        }

        user.email = email;
        user.password_hash = hash_password(&command.password)?;
        user.updated_at = Utc::now();
        Ok(self.users.save_user(&user).await?)
    }

    pub async fn delete(&self, user_id: &str) -> DomainResult<()> {
        info!("Deleting user {}", user_id);
        if !self.users.delete_user(user_id).await? {
            return Err(DomainError::not_found("User", user_id));
        }
        Ok(())
    }

    pub async fn get(&self, user_id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get_user(user_id).await?)
    }
}
