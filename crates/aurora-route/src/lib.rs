//! Aurora — Route Controller.
//!
//! Keeps an ordered itinerary of entity stops and the visitor's position in
//! it, independent of which entity panel is open, so finishing one tour can
//! open the next stop.

pub mod application;
pub mod domain;
