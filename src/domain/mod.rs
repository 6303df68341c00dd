//! Domain layer containing business entities and logic.
//!
//! Nothing here depends on HTTP or on a particular database.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`query`] - Filter and pagination resolution for book listings
//! - [`repositories`] - Data access trait definitions
//!
//! Business workflows live in [`crate::application::services`].

pub mod entities;
pub mod query;
pub mod repositories;
