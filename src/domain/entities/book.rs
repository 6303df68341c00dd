//! Book entity and its creation/update inputs.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Visibility state of a stored record.
///
/// Storage maps this to a nullable `deleted_at` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Live,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    /// Builds the state from a nullable deletion timestamp.
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Live,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Live => None,
            Self::Deleted { at } => Some(*at),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

/// A book record.
///
/// `id`, `created_at` and `updated_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub lifecycle: Lifecycle,
}

impl Book {
    /// Returns true unless the book has been soft-deleted.
    ///
    /// Only live books are visible to `find`, `query` and `search`.
    pub fn is_live(&self) -> bool {
        self.lifecycle.is_live()
    }
}

/// Input data for creating a new book.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: Option<String>,
    pub description: Option<String>,
}

/// One field assignment inside a [`BookPatch`].
///
/// `Isbn(None)` and `Description(None)` clear the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookField {
    Title(String),
    Author(String),
    Year(i32),
    Isbn(Option<String>),
    Description(Option<String>),
}

/// Partial update for an existing book.
///
/// Only the fields that were explicitly set are written; everything else on the
/// stored record is left as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    fields: Vec<BookField>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field assignment. A later assignment to the same field wins.
    pub fn set(mut self, field: BookField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[BookField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Writes every assigned field onto `book`.
    pub fn apply_to(&self, book: &mut Book) {
        for field in &self.fields {
            match field {
                BookField::Title(title) => book.title.clone_from(title),
                BookField::Author(author) => book.author.clone_from(author),
                BookField::Year(year) => book.year = *year,
                BookField::Isbn(isbn) => book.isbn.clone_from(isbn),
                BookField::Description(description) => book.description.clone_from(description),
            }
        }
    }
}
