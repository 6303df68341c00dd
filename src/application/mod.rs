//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin CLI
//! a single API to call.
//!
//! # Available Services
//!
//! - [`services::book_service::BookService`] - Book CRUD, listing and search
//! - [`services::url_service::UrlService`] - URL normalization and usage statistics
//! - [`services::usage_recorder::UsageRecorder`] - Best-effort audit logging

pub mod services;
