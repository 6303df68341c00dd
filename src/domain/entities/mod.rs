//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Book`] - A book record in the library
//! - [`UrlProcessLog`] - An audit entry for one URL normalization
//!
//! # Design Pattern
//!
//! Creation goes through separate input structs (`NewBook`, `NewUrlProcessLog`);
//! partial updates go through [`BookPatch`], an explicit set of field
//! assignments. Soft deletion is tracked by [`Lifecycle`].

pub mod book;
pub mod url_process_log;

pub use book::{Book, BookField, BookPatch, Lifecycle, NewBook};
pub use url_process_log::{NewUrlProcessLog, UrlProcessLog, UrlProcessStats};
