//! Route application layer.

pub mod command_handlers;
pub mod navigator;
pub mod query_handlers;
