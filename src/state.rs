//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{BookService, UrlService};
use crate::domain::repositories::{BookRepository, UrlLogRepository};

/// Static service identity reported by `/health`.
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<BookService<dyn BookRepository>>,
    pub url_service: Arc<UrlService<dyn UrlLogRepository>>,
    pub app_info: Arc<AppInfo>,
    /// When true, client IPs are read from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        book_repository: Arc<dyn BookRepository>,
        url_log_repository: Arc<dyn UrlLogRepository>,
        app_info: AppInfo,
        behind_proxy: bool,
    ) -> Self {
        Self {
            book_service: Arc::new(BookService::new(book_repository)),
            url_service: Arc::new(UrlService::new(url_log_repository)),
            app_info: Arc::new(app_info),
            behind_proxy,
        }
    }
}
