//! Credential checks and JWT issuance.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::users::LoginCommand;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{AuthToken, TokenClaims};
use crate::domain::user_service::verify_password;
use crate::storage::UserStorage;

const INVALID_CREDENTIALS: &str = "Invalid e-mail or password";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStorage>,
    secret: Arc<str>,
    token_lifetime: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStorage>, secret: &str, token_lifetime_hours: u32) -> Self {
        Self {
            users,
            secret: Arc::from(secret),
            token_lifetime: Duration::hours(i64::from(token_lifetime_hours)),
        }
    }

    /// Check credentials and issue a signed token.
    pub async fn authenticate(&self, command: LoginCommand) -> DomainResult<AuthToken> {
        let email = command.email.trim().to_lowercase();
        info!("Authenticating {}", email);

        let user = match self.users.find_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown user {}", email);
                return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };
        if !verify_password(&command.password, &user.password_hash)? {
            warn!("Wrong password for user {}", user.id);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let now = Utc::now();
        let expires_at = now + self.token_lifetime;
        let claims = TokenClaims {
            sub: user.id,
            email: user.email,
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("Failed to encode token: {}", e)))?;

        Ok(AuthToken { token, expires_at })
    }

    /// Decode a bearer token and make sure its user still exists.
    pub async fn verify_token(&self, token: &str) -> DomainResult<TokenClaims> {
        let claims = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {}", e)))?
        .claims;

        if self.users.get_user(&claims.sub).await?.is_none() {
            return Err(DomainError::Unauthorized("Token user no longer exists".to_string()));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::users::RegisterUserCommand;
    use crate::domain::test_utils::TestStores;
    use crate::domain::user_service::UserService;

    const SECRET: &str = "test-secret";

    async fn setup() -> (AuthService, UserService) {
        let stores = TestStores::new().await;
        let users = UserService::new(stores.users.clone());
        users
            .register(RegisterUserCommand {
                email: "parent@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        (AuthService::new(stores.users.clone(), SECRET, 10), users)
    }

    fn login(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_issued_token_verifies() {
        let (auth, _) = setup().await;

        let token = auth.authenticate(login("parent@example.com", "secret1")).await.unwrap();
        let lifetime = token.expires_at - Utc::now();
        assert!(lifetime > Duration::hours(9) && lifetime <= Duration::hours(10));

        let claims = auth.verify_token(&token.token).await.unwrap();
        assert_eq!(claims.email, "parent@example.com");
    }

    #[tokio::test]
    async fn test_wrong_credentials_are_unauthorized() {
        let (auth, _) = setup().await;

        let wrong_password = auth.authenticate(login("parent@example.com", "nope123")).await;
        assert!(matches!(wrong_password, Err(DomainError::Unauthorized(_))));
        let unknown = auth.authenticate(login("other@example.com", "secret1")).await;
        assert!(matches!(unknown, Err(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_rejects_bad_tokens() {
        let (auth, users) = setup().await;

        assert!(matches!(auth.verify_token("garbage").await, Err(DomainError::Unauthorized(_))));

        let token = auth.authenticate(login("parent@example.com", "secret1")).await.unwrap();
        let other_key = AuthService::new(auth.users.clone(), "another-secret", 10);
        assert!(matches!(other_key.verify_token(&token.token).await, Err(DomainError::Unauthorized(_))));

        // Expired well past the default leeway
        let past = Utc::now() - Duration::hours(2);
        let claims = auth.verify_token(&token.token).await.unwrap();
        let expired = encode(
            &Header::default(),
            &TokenClaims {
                iat: past.timestamp() as usize,
                exp: (past + Duration::minutes(30)).timestamp() as usize,
                ..claims.clone()
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(auth.verify_token(&expired).await, Err(DomainError::Unauthorized(_))));

        users.delete(&claims.sub).await.unwrap();
        assert!(matches!(auth.verify_token(&token.token).await, Err(DomainError::Unauthorized(_))));
    }
}
