//! DTOs for the book endpoints.

use serde::{Deserialize, Deserializer};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{BookField, BookPatch, NewBook};
use crate::domain::query::BookFilter;

/// Request body for `POST /api/v1/books`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required and must be at most 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "Author is required and must be at most 255 characters"))]
    pub author: String,

    #[validate(range(min = 1000, max = 2024, message = "Year must be between 1000 and 2024"))]
    pub year: i32,

    /// Empty string is treated as absent.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateBookRequest> for NewBook {
    fn from(req: CreateBookRequest) -> Self {
        NewBook {
            title: req.title,
            author: req.author,
            year: req.year,
            isbn: req.isbn,
            description: req.description,
        }
    }
}

/// Request body for `PUT /api/v1/books/{id}`.
///
/// Every field is optional; only provided fields are changed.
///
/// # `isbn` / `description` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the value
/// - **String** → set new value (an empty ISBN clears it)
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: Option<String>,

    #[validate(range(min = 1000, max = 2024, message = "Year must be between 1000 and 2024"))]
    pub year: Option<i32>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub isbn: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

impl UpdateBookRequest {
    /// Converts the provided fields into a [`BookPatch`].
    pub fn into_patch(self) -> BookPatch {
        let mut patch = BookPatch::new();

        if let Some(title) = self.title {
            patch = patch.set(BookField::Title(title));
        }
        if let Some(author) = self.author {
            patch = patch.set(BookField::Author(author));
        }
        if let Some(year) = self.year {
            patch = patch.set(BookField::Year(year));
        }
        if let Some(isbn) = self.isbn {
            patch = patch.set(BookField::Isbn(isbn.filter(|s| !s.is_empty())));
        }
        if let Some(description) = self.description {
            patch = patch.set(BookField::Description(description));
        }

        patch
    }
}

/// Query parameters for `GET /api/v1/books`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct BookFilterParams {
    pub title: Option<String>,
    pub author: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub year: Option<i32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<i64>,
}

impl From<BookFilterParams> for BookFilter {
    fn from(params: BookFilterParams) -> Self {
        BookFilter {
            title: params.title,
            author: params.author,
            year: params.year,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

/// Query parameters for `GET /api/v1/books/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}
