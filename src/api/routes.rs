//! API route configuration.

use crate::api::handlers::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    process_url_handler, search_books_handler, update_book_handler, url_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Version 1 API routes, mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `GET    /books`          - List books (filtered, paginated)
/// - `POST   /books`          - Create a book
/// - `GET    /books/search`   - Search title, author and description
/// - `GET    /books/{id}`     - Get a book
/// - `PUT    /books/{id}`     - Partially update a book
/// - `DELETE /books/{id}`     - Soft-delete a book
/// - `POST   /process-url`    - Normalize a URL
/// - `GET    /url-stats`      - URL processing statistics
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route("/books/search", get(search_books_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route("/process-url", post(process_url_handler))
        .route("/url-stats", get(url_stats_handler))
}
