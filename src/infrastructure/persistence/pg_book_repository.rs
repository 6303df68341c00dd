//! PostgreSQL implementation of the book repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Book, Lifecycle, NewBook};
use crate::domain::query::{QuerySpec, contains_pattern};
use crate::domain::repositories::BookRepository;
use crate::error::{AppError, map_sqlx_error};

const BOOK_COLUMNS: &str =
    "id, title, author, year, isbn, description, created_at, updated_at, deleted_at";

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    year: i32,
    isbn: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            year: row.year,
            isbn: row.isbn,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: Lifecycle::from_deleted_at(row.deleted_at),
        }
    }
}

/// PostgreSQL repository for books.
///
/// Soft-deleted rows stay in the table with `deleted_at` set and are excluded
/// from every read.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Turns a unique violation into an ISBN conflict.
fn map_write_error(e: sqlx::Error, isbn: Option<&str>) -> AppError {
    match map_sqlx_error(e) {
        AppError::Conflict { .. } => AppError::conflict(
            "A book with this ISBN already exists",
            json!({ "isbn": isbn }),
        ),
        other => other,
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let sql = format!(
            r#"
            INSERT INTO books (title, author, year, isbn, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOOK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(&new_book.title)
            .bind(&new_book.author)
            .bind(new_book.year)
            .bind(&new_book.isbn)
            .bind(&new_book.description)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_write_error(e, new_book.isbn.as_deref()))?;

        Ok(row.into())
    }

    async fn find(&self, id: i64) -> Result<Option<Book>, AppError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 AND deleted_at IS NULL");

        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Book::from))
    }

    async fn save(&self, book: &Book) -> Result<Book, AppError> {
        let sql = format!(
            r#"
            UPDATE books
            SET title = $2,
                author = $3,
                year = $4,
                isbn = $5,
                description = $6,
                updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {BOOK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .bind(&book.isbn)
            .bind(&book.description)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_write_error(e, book.isbn.as_deref()))?;

        row.map(Book::from)
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "id": book.id })))
    }

    async fn soft_delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn query(&self, spec: &QuerySpec) -> Result<(Vec<Book>, i64), AppError> {
        const FILTER: &str = r#"
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR title ILIKE $1 ESCAPE '\')
              AND ($2::text IS NULL OR author ILIKE $2 ESCAPE '\')
              AND ($3::int IS NULL OR year = $3)
        "#;

        let title = spec.title_pattern();
        let author = spec.author_pattern();

        let page_sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books {FILTER} ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        );
        let count_sql = format!("SELECT COUNT(*) FROM books {FILTER}");

        let page = sqlx::query_as::<_, BookRow>(&page_sql)
            .bind(&title)
            .bind(&author)
            .bind(spec.year)
            .bind(spec.limit)
            .bind(spec.offset)
            .fetch_all(self.pool.as_ref());

        let count = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&title)
            .bind(&author)
            .bind(spec.year)
            .fetch_one(self.pool.as_ref());

        let (rows, total) = tokio::try_join!(page, count)?;

        Ok((rows.into_iter().map(Book::from).collect(), total))
    }

    async fn search(&self, text: &str) -> Result<Vec<Book>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books
            WHERE deleted_at IS NULL
              AND (title ILIKE $1 ESCAPE '\'
                   OR author ILIKE $1 ESCAPE '\'
                   OR description ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, BookRow>(&sql)
            .bind(contains_pattern(text))
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                AppError::internal("Database unreachable", json!({ "reason": e.to_string() }))
            })?;
        Ok(())
    }
}
