//! Short link creation and retrieval.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_normalizer::normalize_url;

/// Attempts at allocating a code before the request fails.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Service for creating and managing shortened links.
///
/// # Code Allocation
///
/// The generator never checks the store for a code's prior existence; the
/// `links.code` unique constraint is the single collision authority. Creation
/// runs a bounded loop: generate, insert, and on a unique-constraint conflict
/// regenerate with a fresh code, up to `MAX_CODE_ATTEMPTS` attempts.
pub struct LinkService<L: LinkRepository> {
    repository: Arc<L>,
    code_length: usize,
    public_base_url: String,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `code_length` comes from configuration and is fixed for the process
    /// lifetime.
    pub fn new(repository: Arc<L>, code_length: usize, public_base_url: String) -> Self {
        Self {
            repository,
            code_length,
            public_base_url,
        }
    }

    /// Creates a short link owned by `user_id`.
    ///
    /// The URL is normalized before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL,
    /// [`AppError::Internal`] if no unique code could be allocated within
    /// `MAX_CODE_ATTEMPTS` tries or the store fails.
    pub async fn create_link(&self, long_url: String, user_id: i64) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code(self.code_length).map_err(|e| {
                tracing::error!(error = %e, "short code generation failed");
                AppError::internal("Failed to generate short code", json!({}))
            })?;

            match self
                .repository
                .create(NewLink {
                    code,
                    long_url: normalized_url.clone(),
                    user_id,
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Replaces the destination URL of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL,
    /// [`AppError::NotFound`] if no link matches the code.
    pub async fn update_link(&self, code: &str, long_url: String) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        self.repository
            .update_url(code, &normalized_url)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Deletes a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if self.repository.delete(code).await? {
            Ok(())
        } else {
            Err(link_not_found(code))
        }
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), code)
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
