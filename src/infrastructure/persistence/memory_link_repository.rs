//! Process-local link store.
//!
//! Enforces the same uniqueness rule as the PostgreSQL schema, so the
//! allocation race path behaves identically. Used by the HTTP tests and for
//! running the service without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Link>,
}

/// In-memory repository. Cheap to create; every instance is an empty store.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    table: Mutex<Table>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut table = self.table();

        if table
            .rows
            .iter()
            .any(|l| l.short_code == new_link.short_code)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        table.next_id += 1;
        let link = Link::new(
            table.next_id,
            new_link.original_url,
            new_link.short_code,
            Utc::now(),
        );
        table.rows.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .table()
            .rows
            .iter()
            .find(|l| l.short_code == code)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links = self.table().rows.clone();
        links.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(links)
    }

    async fn record_click(&self, id: i64, clicked_at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut table = self.table();

        match table.rows.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.clicks += 1;
                link.last_clicked = link.last_clicked.max(Some(clicked_at));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<u64, AppError> {
        let mut table = self.table();
        let before = table.rows.len();
        table.rows.retain(|l| l.short_code != code);
        Ok((before - table.rows.len()) as u64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table().rows.len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        Ok(self.table().rows.iter().map(|l| l.clicks).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            short_code: code.to_string(),
            original_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo = InMemoryLinkRepository::new();

        let first = repo.create(new_link("abc123", "https://a.com")).await.unwrap();
        let second = repo.create(new_link("def456", "https://b.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.clicks, 0);
        assert!(first.last_clicked.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123", "https://a.com")).await.unwrap();

        let err = repo
            .create(new_link("abc123", "https://b.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123", "https://a.com")).await.unwrap();

        assert!(repo.create(new_link("ABC123", "https://b.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123", "https://a.com")).await.unwrap();
        repo.create(new_link("def456", "https://b.com")).await.unwrap();

        let codes: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.short_code)
            .collect();

        assert_eq!(codes, vec!["def456", "abc123"]);
    }

    #[tokio::test]
    async fn test_record_click() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.create(new_link("abc123", "https://a.com")).await.unwrap();

        let at = Utc::now();
        assert!(repo.record_click(link.id, at).await.unwrap());
        assert!(repo.record_click(link.id, at).await.unwrap());
        assert!(!repo.record_click(999, at).await.unwrap());

        let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(stored.clicks, 2);
        assert_eq!(stored.last_clicked, Some(at));
        assert_eq!(repo.total_clicks().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_record_click_out_of_order_keeps_latest() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.create(new_link("abc123", "https://a.com")).await.unwrap();

        let earlier = Utc::now();
        let later = earlier + chrono::Duration::milliseconds(5);

        repo.record_click(link.id, later).await.unwrap();
        repo.record_click(link.id, earlier).await.unwrap();

        let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(stored.clicks, 2);
        assert_eq!(stored.last_clicked, Some(later));
    }

    #[tokio::test]
    async fn test_delete_by_code() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("abc123", "https://a.com")).await.unwrap();

        assert_eq!(repo.delete_by_code("abc123").await.unwrap(), 1);
        assert_eq!(repo.delete_by_code("abc123").await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
