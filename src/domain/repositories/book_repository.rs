//! Repository trait for book data access.

use crate::domain::entities::{Book, NewBook};
use crate::domain::query::QuerySpec;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing books.
///
/// Every read method sees live books only; soft-deleted rows are invisible.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryBookRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_book.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Inserts a new book. Id and timestamps are assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the ISBN is already used by a live book.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Finds a live book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Writes all mutable fields of `book` and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book no longer exists or was deleted.
    /// Returns [`AppError::Conflict`] on ISBN collision.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, book: &Book) -> Result<Book, AppError>;

    /// Soft-deletes a live book by setting `deleted_at = now()`.
    ///
    /// Returns the number of rows affected: `0` when the id is unknown or the
    /// book was already deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn soft_delete(&self, id: i64) -> Result<u64, AppError>;

    /// Runs a filtered, paginated listing.
    ///
    /// The returned total counts every match, ignoring `limit` and `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn query(&self, spec: &QuerySpec) -> Result<(Vec<Book>, i64), AppError>;

    /// Case-insensitive substring search over title, author and description.
    ///
    /// Not paginated; ordered like [`Self::query`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, text: &str) -> Result<Vec<Book>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
