//! Aurora Core — shared domain abstractions.
//!
//! This crate defines the ports (key-value store, generation and narration
//! gateways), the persistent key schema and the error types that the tour
//! and route controllers depend on. It contains no infrastructure code.

pub mod command;
pub mod error;
pub mod gateway;
pub mod keys;
pub mod preferences;
pub mod registry;
pub mod store;
pub mod variant;
pub mod view;
