//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store interface for links.
///
/// Implementations must enforce uniqueness of `short_code` themselves; the
/// service layer's existence checks are only a fast path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already stored.
    /// Returns [`AppError::Internal`] on other store errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links, newest first (`created_at` DESC, then `id` DESC).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Atomically adds one click and sets `last_clicked` for the link with `id`.
    ///
    /// `last_clicked` never moves backwards: a `clicked_at` older than the
    /// stored value leaves it unchanged.
    ///
    /// Returns `Ok(false)` if no row has that id (deleted concurrently).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn record_click(&self, id: i64, clicked_at: DateTime<Utc>) -> Result<bool, AppError>;

    /// Deletes the link with `code`, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn delete_by_code(&self, code: &str) -> Result<u64, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `clicks` over all links.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
