//! Business logic services for the application layer.

pub mod book_service;
pub mod url_service;
pub mod usage_recorder;

pub use book_service::{BookPage, BookService};
pub use url_service::{ProcessedUrl, RequestOrigin, UrlService};
pub use usage_recorder::UsageRecorder;
