//! Route domain: itinerary planning and the route aggregate.

pub mod aggregates;
pub mod commands;
pub mod policy;
