//! Aurora — Tour Controller.
//!
//! Produces, caches and steps through a narrated sequence of facts for one
//! entity. The narrative style rotates with the entity's visit count so
//! repeat visitors hear different phrasing without regenerating each time.

pub mod application;
pub mod domain;
