//! Catalog loading and read-only views.

pub mod loader;
pub mod query_handlers;
