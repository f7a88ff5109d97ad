//! Shared test fakes and fixtures for the Aurora space encyclopedia.

mod catalog;
mod generator;
mod narrator;
mod store;

pub use catalog::{entity, solar_system};
pub use generator::{GatedGenerator, ScriptedGenerator};
pub use narrator::{FailingNarrator, RecordingNarrator};
pub use store::{FailingStore, InMemoryStore};
