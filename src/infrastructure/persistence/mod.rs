//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgBookRepository`] - Book storage on PostgreSQL
//! - [`PgUrlLogRepository`] - URL processing log on PostgreSQL
//! - [`InMemoryBookRepository`], [`InMemoryUrlLogRepository`] - process-local
//!   stores with the same semantics
//!
//! Schema lives in `migrations/` and is applied by [`MIGRATOR`] at startup.

pub mod memory;
pub mod pg_book_repository;
pub mod pg_url_log_repository;
pub mod seed;

pub use memory::{InMemoryBookRepository, InMemoryUrlLogRepository};
pub use pg_book_repository::PgBookRepository;
pub use pg_url_log_repository::PgUrlLogRepository;
pub use seed::{sample_books, seed_sample_books};

/// Bundled SQL migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
