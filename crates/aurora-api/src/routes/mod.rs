//! Route modules organized by context.

pub mod entities;
pub mod health;
pub mod preferences;
pub mod route;
pub mod tours;
