//! Book record service.

use std::sync::Arc;

use crate::domain::entities::{Book, BookPatch, NewBook};
use crate::domain::query::{BookFilter, QuerySpec};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;
use serde_json::json;

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 2024;
pub const MAX_TEXT_LEN: usize = 255;
pub const ISBN_LEN: usize = 13;

/// One page of a book listing.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// Matches across all pages.
    pub total: i64,
    pub query: QuerySpec,
}

/// Service for creating, reading, updating, deleting and searching books.
pub struct BookService<R: BookRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: BookRepository + ?Sized> BookService<R> {
    /// Creates a new book service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists live books matching `filter`, newest first.
    ///
    /// Page size and offset are coerced by [`QuerySpec::build`], so this never
    /// rejects a filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, filter: BookFilter) -> Result<BookPage, AppError> {
        let query = QuerySpec::build(filter);
        let (books, total) = self.repository.query(&query).await?;

        Ok(BookPage {
            books,
            total,
            query,
        })
    }

    /// Retrieves a live book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live book has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_id(&self, id: i64) -> Result<Book, AppError> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| book_not_found(id))
    }

    /// Creates a book. An empty ISBN is stored as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is out of bounds.
    /// Returns [`AppError::Conflict`] if the ISBN is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, mut new_book: NewBook) -> Result<Book, AppError> {
        new_book.isbn = new_book.isbn.filter(|isbn| !isbn.is_empty());
        check_fields(
            &new_book.title,
            &new_book.author,
            new_book.year,
            new_book.isbn.as_deref(),
        )?;

        let book = self.repository.create(new_book).await?;
        tracing::info!(book_id = book.id, "book created");
        Ok(book)
    }

    /// Applies `patch` to a live book and persists the result.
    ///
    /// This is a read followed by a write without a transaction: an update that
    /// lands in between is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live book has this id.
    /// Returns [`AppError::Validation`] if the patched book would be invalid.
    /// Returns [`AppError::Conflict`] if the new ISBN is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, id: i64, patch: BookPatch) -> Result<Book, AppError> {
        let mut book = self.get_by_id(id).await?;

        if patch.is_empty() {
            return Ok(book);
        }

        patch.apply_to(&mut book);
        book.isbn = book.isbn.filter(|isbn| !isbn.is_empty());
        check_fields(&book.title, &book.author, book.year, book.isbn.as_deref())?;

        let saved = self.repository.save(&book).await?;
        tracing::info!(book_id = id, fields = patch.fields().len(), "book updated");
        Ok(saved)
    }

    /// Soft-deletes a live book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown or already deleted.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let affected = self.repository.soft_delete(id).await?;
        if affected == 0 {
            return Err(book_not_found(id));
        }

        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    /// Searches title, author and description for `text`, matched as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `text` is blank.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn search(&self, text: &str) -> Result<Vec<Book>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::bad_request(
                "Search query is required",
                json!({ "q": ["must not be blank"] }),
            ));
        }

        self.repository.search(text).await
    }

    /// Checks that the backing store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn book_not_found(id: i64) -> AppError {
    AppError::not_found("Book not found", json!({ "id": id }))
}

/// Enforces the invariants of a live book.
fn check_fields(title: &str, author: &str, year: i32, isbn: Option<&str>) -> Result<(), AppError> {
    let mut problems = serde_json::Map::new();

    let text_len_ok = |s: &str| !s.is_empty() && s.chars().count() <= MAX_TEXT_LEN;
    if !text_len_ok(title) {
        problems.insert("title".into(), json!(["must be 1-255 characters"]));
    }
    if !text_len_ok(author) {
        problems.insert("author".into(), json!(["must be 1-255 characters"]));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        problems.insert("year".into(), json!(["must be between 1000 and 2024"]));
    }
    if isbn.is_some_and(|isbn| isbn.chars().count() != ISBN_LEN) {
        problems.insert("isbn".into(), json!(["must be exactly 13 characters"]));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Validation failed",
            serde_json::Value::Object(problems),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BookField, Lifecycle};
    use crate::domain::repositories::MockBookRepository;
    use chrono::Utc;

    fn create_test_book(id: i64) -> Book {
        let now = Utc::now();
        Book {
            id,
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            year: 2008,
            isbn: Some("9780132350884".to_string()),
            description: Some("Agile craftsmanship".to_string()),
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Live,
        }
    }

    fn new_book(isbn: Option<&str>) -> NewBook {
        NewBook {
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            year: 2008,
            isbn: isbn.map(str::to_string),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_list_clamps_limit_before_querying() {
        let mut mock_repo = MockBookRepository::new();

        mock_repo
            .expect_query()
            .withf(|spec| spec.limit == 100 && spec.offset == 0)
            .times(1)
            .returning(|_| Ok((vec![create_test_book(1)], 250)));

        let service = BookService::new(Arc::new(mock_repo));

        let page = service
            .list(BookFilter {
                limit: Some(500),
                offset: Some(-5),
                ..BookFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 250);
        assert_eq!(page.books.len(), 1);
        assert_eq!(page.query.limit, 100);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_find().times(1).returning(|_| Ok(None));

        let service = BookService::new(Arc::new(mock_repo));
        let result = service.get_by_id(99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_drops_empty_isbn() {
        let mut mock_repo = MockBookRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_book| new_book.isbn.is_none())
            .times(1)
            .returning(|_| {
                let mut book = create_test_book(1);
                book.isbn = None;
                Ok(book)
            });

        let service = BookService::new(Arc::new(mock_repo));
        let book = service.create(new_book(Some(""))).await.unwrap();

        assert!(book.isbn.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_create().times(0);

        let service = BookService::new(Arc::new(mock_repo));

        let mut input = new_book(Some("123"));
        input.year = 2025;
        let result = service.create(input).await;

        match result.unwrap_err() {
            AppError::Validation { details, .. } => {
                assert!(details.get("isbn").is_some());
                assert!(details.get("year").is_some());
                assert!(details.get("title").is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_title_only_keeps_other_fields() {
        let mut mock_repo = MockBookRepository::new();

        mock_repo
            .expect_find()
            .times(1)
            .returning(|id| Ok(Some(create_test_book(id))));

        mock_repo
            .expect_save()
            .withf(|book| {
                book.title == "X"
                    && book.author == "Robert C. Martin"
                    && book.year == 2008
                    && book.isbn.as_deref() == Some("9780132350884")
            })
            .times(1)
            .returning(|book| Ok(book.clone()));

        let service = BookService::new(Arc::new(mock_repo));
        let patch = BookPatch::new().set(BookField::Title("X".to_string()));

        let book = service.update(3, patch).await.unwrap();
        assert_eq!(book.title, "X");
        assert_eq!(book.description.as_deref(), Some("Agile craftsmanship"));
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_find().times(1).returning(|_| Ok(None));
        mock_repo.expect_save().times(0);

        let service = BookService::new(Arc::new(mock_repo));
        let patch = BookPatch::new().set(BookField::Year(2000));

        let result = service.update(3, patch).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_empty_patch_skips_write() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo
            .expect_find()
            .times(1)
            .returning(|id| Ok(Some(create_test_book(id))));
        mock_repo.expect_save().times(0);

        let service = BookService::new(Arc::new(mock_repo));
        let book = service.update(3, BookPatch::new()).await.unwrap();

        assert_eq!(book.id, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_soft_delete().times(1).returning(|_| Ok(0));

        let service = BookService::new(Arc::new(mock_repo));
        let result = service.delete(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo
            .expect_soft_delete()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(1));

        let service = BookService::new(Arc::new(mock_repo));
        assert!(service.delete(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_search_blank_text_rejected() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_search().times(0);

        let service = BookService::new(Arc::new(mock_repo));
        let result = service.search("   ").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_search_keeps_surrounding_spaces() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo
            .expect_search()
            .withf(|text| text == " go")
            .times(1)
            .returning(|_| Ok(vec![create_test_book(1)]));

        let service = BookService::new(Arc::new(mock_repo));
        let books = service.search(" go").await.unwrap();

        assert_eq!(books.len(), 1);
    }
}
