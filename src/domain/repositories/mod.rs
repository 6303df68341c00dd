//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented in
//! `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`BookRepository`] - Book CRUD, listing and search
//! - [`UrlLogRepository`] - URL normalization audit log
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.
//! See integration tests in `tests/repository_*.rs` for the PostgreSQL side.

pub mod book_repository;
pub mod url_log_repository;

pub use book_repository::BookRepository;
pub use url_log_repository::UrlLogRepository;

#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use url_log_repository::MockUrlLogRepository;
