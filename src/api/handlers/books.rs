//! Handlers for book endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::book::{BookFilterParams, CreateBookRequest, SearchParams, UpdateBookRequest};
use crate::api::dto::envelope::ApiResponse;
use crate::domain::entities::Book;
use crate::error::AppError;
use crate::state::AppState;

/// Lists books with optional filtering and pagination.
///
/// # Endpoint
///
/// `GET /api/v1/books`
///
/// # Query Parameters
///
/// - `title` - case-insensitive substring of the title
/// - `author` - case-insensitive substring of the author
/// - `year` - exact publication year
/// - `limit` - page size (default 10, capped at 100)
/// - `offset` - items to skip (default 0)
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": [{ "id": 4, "title": "Microservices Patterns", ... }],
///   "total": 4,
///   "page": 1,
///   "limit": 10
/// }
/// ```
pub async fn list_books_handler(
    State(state): State<AppState>,
    params: Result<Query<BookFilterParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Book>>>, AppError> {
    let Query(params) = params?;

    let page = state.book_service.list(params.into()).await?;

    Ok(Json(
        ApiResponse::data(page.books).with_page(&page.query, page.total),
    ))
}

/// Returns a single book.
///
/// # Endpoint
///
/// `GET /api/v1/books/{id}`
///
/// # Errors
///
/// - 400 if `id` is not an integer
/// - 404 if the book does not exist or was deleted
pub async fn get_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Book>>, AppError> {
    let Path(id) = id?;

    let book = state.book_service.get_by_id(id).await?;

    Ok(Json(ApiResponse::data(book)))
}

/// Creates a book.
///
/// # Endpoint
///
/// `POST /api/v1/books`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Clean Code",
///   "author": "Robert C. Martin",
///   "year": 2008,
///   "isbn": "9780132350884",
///   "description": "A Handbook of Agile Software Craftsmanship"
/// }
/// ```
///
/// # Errors
///
/// - 400 on malformed JSON or failed validation
/// - 409 if the ISBN belongs to another live book
pub async fn create_book_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let book = state.book_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(book).with_message("Book created successfully")),
    ))
}

/// Partially updates a book.
///
/// # Endpoint
///
/// `PUT /api/v1/books/{id}`
///
/// Fields missing from the body are left untouched. `isbn` and `description`
/// accept `null` to clear the stored value.
///
/// # Errors
///
/// - 400 on malformed JSON or failed validation
/// - 404 if the book does not exist or was deleted
/// - 409 if the new ISBN belongs to another live book
pub async fn update_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Book>>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let book = state.book_service.update(id, payload.into_patch()).await?;

    Ok(Json(
        ApiResponse::data(book).with_message("Book updated successfully"),
    ))
}

/// Soft-deletes a book.
///
/// # Endpoint
///
/// `DELETE /api/v1/books/{id}`
///
/// # Errors
///
/// - 404 if the book does not exist or was already deleted
pub async fn delete_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Path(id) = id?;

    state.book_service.delete(id).await?;

    Ok(Json(ApiResponse::message("Book deleted successfully")))
}

/// Searches title, author and description.
///
/// # Endpoint
///
/// `GET /api/v1/books/search?q=martin`
///
/// Not paginated. `total` is the number of matches.
///
/// # Errors
///
/// - 400 if `q` is missing or blank
pub async fn search_books_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Book>>>, AppError> {
    let Query(params) = params?;

    let books = state.book_service.search(&params.q).await?;
    let total = books.len() as i64;

    Ok(Json(ApiResponse::data(books).with_total(total)))
}
