//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Dependencies shared across handlers.
///
/// Cloned per request by Axum; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Public origin for short URLs; `None` derives it from each request.
    pub base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, base_url: Option<String>) -> Self {
        Self {
            link_service,
            base_url: base_url.map(Arc::from),
        }
    }

    /// Builds state over `repository` with an entropy-seeded code generator.
    pub fn from_repository(repository: Arc<dyn LinkRepository>, base_url: Option<String>) -> Self {
        Self::new(Arc::new(LinkService::new(repository)), base_url)
    }
}
