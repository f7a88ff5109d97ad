//! Tour application services.

pub mod command_handlers;
pub mod controller;
pub mod narration;
pub mod query_handlers;
