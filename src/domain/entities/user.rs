//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered user.
///
/// `username` and `email` are each unique store-wide. `token` holds a copy of
/// the most recently issued session token; it is informational only and is
/// never consulted when validating tokens.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_carries_hash_not_plaintext() {
        let new_user = NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
        };

        assert_eq!(new_user.username, "alice");
        assert!(new_user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_user_token_optional() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(user.token.is_none());
    }
}
