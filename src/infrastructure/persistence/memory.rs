//! In-process repository implementations.
//!
//! Same contract as the PostgreSQL repositories, backed by a `Mutex<Vec<_>>`.
//! The HTTP tests run the full router against these.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{
    Book, Lifecycle, NewBook, NewUrlProcessLog, UrlProcessLog, UrlProcessStats,
};
use crate::domain::query::{QuerySpec, contains_ignore_case};
use crate::domain::repositories::{BookRepository, UrlLogRepository};
use crate::error::AppError;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::internal("In-memory store poisoned", json!({})))
}

#[derive(Default)]
struct BookTable {
    next_id: i64,
    rows: Vec<Book>,
}

impl BookTable {
    fn isbn_taken(&self, isbn: Option<&str>, except_id: i64) -> bool {
        let Some(isbn) = isbn else {
            return false;
        };
        self.rows
            .iter()
            .any(|b| b.is_live() && b.id != except_id && b.isbn.as_deref() == Some(isbn))
    }
}

fn isbn_conflict(isbn: Option<&str>) -> AppError {
    AppError::conflict(
        "A book with this ISBN already exists",
        json!({ "isbn": isbn }),
    )
}

/// Book store kept in memory.
#[derive(Default)]
pub struct InMemoryBookRepository {
    table: Mutex<BookTable>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let mut table = lock(&self.table)?;

        if table.isbn_taken(new_book.isbn.as_deref(), 0) {
            return Err(isbn_conflict(new_book.isbn.as_deref()));
        }

        table.next_id += 1;
        let now = Utc::now();
        let book = Book {
            id: table.next_id,
            title: new_book.title,
            author: new_book.author,
            year: new_book.year,
            isbn: new_book.isbn,
            description: new_book.description,
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Live,
        };
        table.rows.push(book.clone());

        Ok(book)
    }

    async fn find(&self, id: i64) -> Result<Option<Book>, AppError> {
        let table = lock(&self.table)?;
        Ok(table
            .rows
            .iter()
            .find(|b| b.id == id && b.is_live())
            .cloned())
    }

    async fn save(&self, book: &Book) -> Result<Book, AppError> {
        let mut table = lock(&self.table)?;

        if table.isbn_taken(book.isbn.as_deref(), book.id) {
            return Err(isbn_conflict(book.isbn.as_deref()));
        }

        let stored = table
            .rows
            .iter_mut()
            .find(|b| b.id == book.id && b.is_live())
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "id": book.id })))?;

        stored.title.clone_from(&book.title);
        stored.author.clone_from(&book.author);
        stored.year = book.year;
        stored.isbn.clone_from(&book.isbn);
        stored.description.clone_from(&book.description);
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<u64, AppError> {
        let mut table = lock(&self.table)?;

        match table.rows.iter_mut().find(|b| b.id == id && b.is_live()) {
            Some(book) => {
                let now = Utc::now();
                book.lifecycle = Lifecycle::Deleted { at: now };
                book.updated_at = now;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn query(&self, spec: &QuerySpec) -> Result<(Vec<Book>, i64), AppError> {
        let table = lock(&self.table)?;

        let mut matching: Vec<Book> = table
            .rows
            .iter()
            .filter(|b| spec.matches(b))
            .cloned()
            .collect();
        matching.sort_by(QuerySpec::compare);

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(spec.offset).unwrap_or(0))
            .take(usize::try_from(spec.limit).unwrap_or(0))
            .collect();

        Ok((page, total))
    }

    async fn search(&self, text: &str) -> Result<Vec<Book>, AppError> {
        let table = lock(&self.table)?;

        let mut found: Vec<Book> = table
            .rows
            .iter()
            .filter(|b| b.is_live())
            .filter(|b| {
                contains_ignore_case(&b.title, text)
                    || contains_ignore_case(&b.author, text)
                    || b
                        .description
                        .as_deref()
                        .is_some_and(|d| contains_ignore_case(d, text))
            })
            .cloned()
            .collect();
        found.sort_by(QuerySpec::compare);

        Ok(found)
    }

    async fn ping(&self) -> Result<(), AppError> {
        lock(&self.table).map(|_| ())
    }
}

/// URL processing log kept in memory.
#[derive(Default)]
pub struct InMemoryUrlLogRepository {
    rows: Mutex<Vec<UrlProcessLog>>,
}

impl InMemoryUrlLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded entry, oldest first.
    pub fn entries(&self) -> Result<Vec<UrlProcessLog>, AppError> {
        lock(&self.rows).map(|rows| rows.clone())
    }
}

#[async_trait]
impl UrlLogRepository for InMemoryUrlLogRepository {
    async fn record(&self, entry: NewUrlProcessLog) -> Result<UrlProcessLog, AppError> {
        let mut rows = lock(&self.rows)?;

        let now = Utc::now();
        let log = UrlProcessLog {
            id: rows.len() as i64 + 1,
            original_url: entry.original_url,
            processed_url: entry.processed_url,
            operation: entry.operation,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Live,
        };
        rows.push(log.clone());

        Ok(log)
    }

    async fn stats(&self) -> Result<UrlProcessStats, AppError> {
        let rows = lock(&self.rows)?;

        let mut stats = UrlProcessStats::default();
        for log in rows.iter().filter(|l| l.lifecycle.is_live()) {
            stats.total_requests += 1;
            *stats
                .by_operation
                .entry(log.operation.as_str().to_string())
                .or_insert(0) += 1;
        }

        Ok(stats)
    }
}
