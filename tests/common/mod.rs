#![allow(dead_code)]

use axum_test::TestServer;
use library_backend::domain::entities::NewBook;
use library_backend::domain::repositories::BookRepository;
use library_backend::infrastructure::persistence::{
    InMemoryBookRepository, InMemoryUrlLogRepository,
};
use library_backend::routes::build_router;
use library_backend::state::{AppInfo, AppState};
use serde_json::Value;
use std::sync::Arc;

pub struct TestApp {
    pub server: TestServer,
    pub books: Arc<InMemoryBookRepository>,
    pub url_logs: Arc<InMemoryUrlLogRepository>,
}

pub fn test_app_info() -> AppInfo {
    AppInfo {
        name: "Library Backend".to_string(),
        version: "1.0.0".to_string(),
        environment: "test".to_string(),
    }
}

/// Full router over empty in-memory stores.
pub fn spawn_app() -> TestApp {
    spawn_app_with(false)
}

pub fn spawn_app_with(behind_proxy: bool) -> TestApp {
    let books = Arc::new(InMemoryBookRepository::new());
    let url_logs = Arc::new(InMemoryUrlLogRepository::new());

    let state = AppState::new(
        books.clone(),
        url_logs.clone(),
        test_app_info(),
        behind_proxy,
    );

    let server = TestServer::new(build_router(state)).unwrap();

    TestApp {
        server,
        books,
        url_logs,
    }
}

pub fn new_book(title: &str, author: &str, year: i32, isbn: Option<&str>) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        year,
        isbn: isbn.map(str::to_string),
        description: None,
    }
}

pub async fn create_test_book(app: &TestApp, title: &str, author: &str, year: i32) -> i64 {
    app.books
        .create(new_book(title, author, year, None))
        .await
        .unwrap()
        .id
}

pub fn error_code(json: &Value) -> &str {
    json["code"].as_str().unwrap_or_default()
}
