//! Aurora — Entity Catalog.
//!
//! Static, read-only collection of celestial-body records keyed by slug.
//! Loaded once at startup from a JSON or YAML document; never mutated.

pub mod application;
pub mod domain;
