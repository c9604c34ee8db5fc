//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{LinkService, TokenService, UserService};
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

/// Application state shared across all request handlers.
///
/// Owns the store handle and the service graph built over it. Constructed
/// once at startup and cloned (cheaply, all `Arc`s) per handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub token_service: Arc<TokenService<PgUserRepository>>,
}

impl AppState {
    /// Wires repositories and services over a connection pool.
    pub fn new(
        pool: PgPool,
        token_signing_secret: &str,
        short_code_length: usize,
        public_base_url: String,
    ) -> Self {
        let pool = Arc::new(pool);

        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));

        let token_service = Arc::new(TokenService::new(
            token_signing_secret,
            user_repository.clone(),
        ));
        let user_service = Arc::new(UserService::new(user_repository, token_service.clone()));
        let link_service = Arc::new(LinkService::new(
            link_repository,
            short_code_length,
            public_base_url,
        ));

        Self {
            db: pool,
            user_service,
            link_service,
            token_service,
        }
    }
}
