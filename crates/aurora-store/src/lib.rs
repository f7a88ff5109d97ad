//! Aurora — persistent key-value store.
//!
//! `PostgreSQL` implementation of the `KeyValueStore` port. Holds the
//! preferences, visit counters, tour step caches and used-facts ledgers.

pub mod pg_key_value_store;
pub mod schema;
