//! HTTP middleware and request extractors.

pub mod client_info;
pub mod tracing;
