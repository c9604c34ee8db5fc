//! Registration and login orchestration.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::token_service::TokenService;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Service for user registration and credential-based login.
pub struct UserService<U: UserRepository> {
    repository: Arc<U>,
    tokens: Arc<TokenService<U>>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repository: Arc<U>, tokens: Arc<TokenService<U>>) -> Self {
        Self { repository, tokens }
    }

    /// Registers a new user.
    ///
    /// The plaintext password is hashed before it reaches the repository and
    /// is never stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    /// Returns [`AppError::Internal`] if hashing or the store fails.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::internal("Failed to process credentials", json!({}))
        })?;

        self.repository
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await
    }

    /// Verifies credentials and issues a fresh session token.
    ///
    /// Unknown usernames and wrong passwords produce the same generic
    /// authentication error so the endpoint does not reveal which usernames
    /// exist. On success the token is echoed onto the user row as an
    /// informational copy; validation never reads it back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials,
    /// [`AppError::Internal`] if signing or the store fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), AppError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            return Err(invalid_credentials());
        };

        let password_matches = verify_password(password, &user.password_hash).map_err(|e| {
            tracing::error!(error = %e, "password verification failed");
            AppError::internal("Failed to verify credentials", json!({}))
        })?;

        if !password_matches {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&user.username, &user.email)?;

        self.repository.store_token(user.id, &token).await?;

        Ok((user, token))
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}
