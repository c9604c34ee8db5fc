//! Session token issuance and validation.
//!
//! Tokens are stateless HS256-signed JWTs carrying the holder's identity.
//! Verification needs only the shared signing secret, so no session table
//! exists and multiple valid tokens may coexist for the same user. There is
//! no revocation list; the one-year lifetime makes a leaked token a
//! long-lived credential.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Issuer claim stamped into every token and required during validation.
pub const ISSUER: &str = "linksnip";

/// Token lifetime. Deliberately long-lived; see module docs.
const TOKEN_LIFETIME_DAYS: i64 = 365;

/// Claim set carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the holder's username.
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature mismatch, malformed structure, or missing claims.
    #[error("invalid token")]
    Invalid,
    /// Signature is fine but the expiry claim is in the past.
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid => {
                AppError::unauthorized("Invalid token", json!({ "reason": "invalid token" }))
            }
            TokenError::Expired => {
                AppError::unauthorized("Token has expired", json!({ "reason": "token expired" }))
            }
            TokenError::Signing(err) => {
                tracing::error!(error = %err, "token signing failed");
                AppError::internal("Failed to sign token", json!({}))
            }
        }
    }
}

/// Service for minting and verifying bearer tokens.
pub struct TokenService<U: UserRepository> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    users: Arc<U>,
}

impl<U: UserRepository> TokenService<U> {
    /// Creates a new token service.
    ///
    /// # Arguments
    ///
    /// - `secret` - symmetric signing secret; must match across issue and validate
    /// - `users` - user repository used to resolve token subjects
    pub fn new(secret: &str, users: Arc<U>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            users,
        }
    }

    /// Issues a signed token for the given identity.
    ///
    /// Claims: `{sub: username, email, iss, iat: now, exp: now + 1 year}`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if signing fails (misconfigured secret).
    pub fn issue(&self, username: &str, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            email: email.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verifies a token's signature and claims.
    ///
    /// The signing algorithm is pinned to HS256 and the issuer to [`ISSUER`].
    /// Signature mismatch, malformed structure, and missing claims all map to
    /// the generic [`TokenError::Invalid`]; a correctly signed token whose
    /// expiry has passed maps to [`TokenError::Expired`].
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        // The library check applies leeway; re-check against the raw clock.
        if data.claims.exp < Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Validates a token and resolves the user it identifies.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired,
    /// or if no user matches the subject claim.
    pub async fn resolve_user(&self, token: &str) -> Result<User, AppError> {
        let claims = self.validate(token)?;

        self.users
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Invalid token", json!({ "reason": "unknown subject" }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    const SECRET: &str = "test-signing-secret";

    fn service() -> TokenService<MockUserRepository> {
        TokenService::new(SECRET, Arc::new(MockUserRepository::new()))
    }

    fn service_with(repo: MockUserRepository) -> TokenService<MockUserRepository> {
        TokenService::new(SECRET, Arc::new(repo))
    }

    fn sign_claims(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn test_user(username: &str, email: &str) -> User {
        User {
            id: 1,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_validate_roundtrip() {
        let svc = service();

        let token = svc.issue("alice", "a@x.com").unwrap();
        let claims = svc.validate(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 365 * 24 * 3600);
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let svc = service();
        let other = TokenService::new("another-secret", Arc::new(MockUserRepository::new()));

        let token = other.issue("alice", "a@x.com").unwrap();

        assert!(matches!(svc.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let svc = service();

        let now = Utc::now().timestamp();
        let token = sign_claims(&Claims {
            sub: "alice".to_string(),
            email: "a@x.com".to_string(),
            iss: ISSUER.to_string(),
            iat: now - 7200,
            exp: now - 3600,
        });

        assert!(matches!(svc.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_validate_rejects_expiry_within_library_leeway() {
        let svc = service();

        // 30s past expiry is inside jsonwebtoken's default leeway; the
        // explicit re-check must still reject it.
        let now = Utc::now().timestamp();
        let token = sign_claims(&Claims {
            sub: "alice".to_string(),
            email: "a@x.com".to_string(),
            iss: ISSUER.to_string(),
            iat: now - 7200,
            exp: now - 30,
        });

        assert!(matches!(svc.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_validate_rejects_malformed_token() {
        let svc = service();

        assert!(matches!(svc.validate("garbage"), Err(TokenError::Invalid)));
        assert!(matches!(svc.validate(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_validate_rejects_wrong_issuer() {
        let svc = service();

        let now = Utc::now().timestamp();
        let token = sign_claims(&Claims {
            sub: "alice".to_string(),
            email: "a@x.com".to_string(),
            iss: "someone-else".to_string(),
            iat: now,
            exp: now + 3600,
        });

        assert!(matches!(svc.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_validate_rejects_missing_claims() {
        #[derive(Serialize)]
        struct PartialClaims {
            sub: String,
            iss: String,
            iat: i64,
            exp: i64,
        }

        let svc = service();

        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &PartialClaims {
                sub: "alice".to_string(),
                iss: ISSUER.to_string(),
                iat: now,
                exp: now + 3600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(svc.validate(&token), Err(TokenError::Invalid)));
    }

    #[tokio::test]
    async fn test_resolve_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(Some(test_user("alice", "a@x.com"))));

        let svc = service_with(repo);

        let token = svc.issue("alice", "a@x.com").unwrap();
        let user = svc.resolve_user(&token).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_resolve_user_unknown_subject() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let svc = service_with(repo);

        let token = svc.issue("ghost", "g@x.com").unwrap();
        let err = svc.resolve_user(&token).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_resolve_user_invalid_token_skips_lookup() {
        // No expectation set: a repository call would panic the test.
        let svc = service();

        let err = svc.resolve_user("garbage").await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }
}
