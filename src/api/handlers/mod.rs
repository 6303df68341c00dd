//! HTTP request handlers.

pub mod books;
pub mod health;
pub mod url;

pub use books::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    search_books_handler, update_book_handler,
};
pub use health::health_handler;
pub use url::{process_url_handler, url_stats_handler};
