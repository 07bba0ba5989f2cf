//! Link allocation, lookup, visit accounting and deletion.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, MAX_CODE_LENGTH, is_reserved, is_valid_code};
use crate::utils::url_validator::is_valid_url;

/// Number of checked candidates before falling back to an unchecked one.
pub const MAX_GENERATION_ATTEMPTS: usize = 6;

/// Aggregate counters over the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTotals {
    pub links: i64,
    pub clicks: i64,
}

/// Service for creating, resolving and removing short links.
///
/// Existence checks before insert are an optimization that yields a friendlier
/// error. The store's uniqueness constraint is what actually guarantees that
/// two links never share a code; a lost race still surfaces as
/// [`AppError::Conflict`].
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    generator: CodeGenerator,
}

impl LinkService {
    /// Creates a service with an entropy-seeded code generator.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self::with_generator(link_repository, CodeGenerator::from_entropy())
    }

    /// Creates a service with an explicit code generator.
    pub fn with_generator(
        link_repository: Arc<dyn LinkRepository>,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            link_repository,
            generator,
        }
    }

    /// Allocates a short code for `original_url` and stores the link.
    ///
    /// An empty `custom_code` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `original_url` is not an http(s) URL (`invalid_url`)
    /// - `custom_code` does not match `^[A-Za-z0-9]{6,8}$` or is reserved (`invalid_code`)
    ///
    /// Returns [`AppError::Conflict`] if the custom code is taken, or if the
    /// store rejects the insert on its uniqueness constraint.
    ///
    /// Returns [`AppError::Internal`] on other store errors.
    pub async fn create_link(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        if !is_valid_url(original_url) {
            return Err(AppError::invalid_url(original_url));
        }

        let short_code = match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => self.claim_custom_code(custom).await?,
            None => self.generate_unique_code().await?,
        };

        let link = self
            .link_repository
            .create(NewLink {
                short_code: short_code.clone(),
                original_url: original_url.to_string(),
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::code_exists(&short_code),
                other => other,
            })?;

        info!(code = %link.short_code, id = link.id, "Short link created");

        Ok(link)
    }

    /// Resolves `code` for a redirect and counts the visit.
    ///
    /// The click is recorded before the caller sends the redirect, so a client
    /// that abandons the redirect is still counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is reserved, malformed or
    /// unknown. Malformed codes never reach the store.
    pub async fn visit(&self, code: &str) -> Result<Link, AppError> {
        if is_reserved(code) || !is_valid_code(code) {
            return Err(AppError::link_not_found(code));
        }

        let mut link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::link_not_found(code))?;

        let clicked_at = Utc::now();
        if !self.link_repository.record_click(link.id, clicked_at).await? {
            return Err(AppError::link_not_found(code));
        }

        link.clicks += 1;
        link.last_clicked = link.last_clicked.max(Some(clicked_at));

        debug!(code, clicks = link.clicks, "Visit recorded");

        Ok(link)
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code,
    /// [`AppError::NotFound`] if no link has it.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::invalid_code(code));
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::link_not_found(code))
    }

    /// Lists every link, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Deletes a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code,
    /// [`AppError::NotFound`] if nothing was deleted.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) {
            return Err(AppError::invalid_code(code));
        }

        let deleted = self.link_repository.delete_by_code(code).await?;
        if deleted == 0 {
            return Err(AppError::link_not_found(code));
        }

        info!(code, "Short link deleted");

        Ok(())
    }

    /// Returns total links and total clicks.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        Ok(LinkTotals {
            links: self.link_repository.count().await?,
            clicks: self.link_repository.total_clicks().await?,
        })
    }

    async fn claim_custom_code(&self, custom: &str) -> Result<String, AppError> {
        if !is_valid_code(custom) || is_reserved(custom) {
            return Err(AppError::invalid_code(custom));
        }

        if self.link_repository.find_by_code(custom).await?.is_some() {
            return Err(AppError::code_exists(custom));
        }

        Ok(custom.to_string())
    }

    /// Tries [`MAX_GENERATION_ATTEMPTS`] checked candidates of length 6-8.
    ///
    /// If all of them collide, returns one unchecked 8-character candidate.
    /// A collision there is caught by the store constraint on insert.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = self.generator.candidate();

            if is_reserved(&candidate) {
                continue;
            }

            if self
                .link_repository
                .find_by_code(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }

            debug!(attempt, candidate = %candidate, "Generated code collided");
        }

        let fallback = self.generator.generate(MAX_CODE_LENGTH);
        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            code = %fallback,
            "All generated codes collided, using unchecked fallback"
        );

        Ok(fallback)
    }
}
