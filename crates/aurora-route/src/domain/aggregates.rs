//! The route aggregate.

use aurora_core::error::DomainError;

use super::policy::plan_stops;

/// An active itinerary and the visitor's position in it.
///
/// `stops` is never empty and `cursor` always indexes into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    from: String,
    to: String,
    stops: Vec<String>,
    cursor: usize,
}

impl Route {
    /// Plans a route from `from` to `to` over the catalog order
    /// `available`, positioned on the first stop.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntityNotFound` if either slug is not available.
    pub fn plan(from: &str, to: &str, available: &[String]) -> Result<Self, DomainError> {
        Ok(Self {
            from: from.to_owned(),
            to: to.to_owned(),
            stops: plan_stops(from, to, available)?,
            cursor: 0,
        })
    }

    /// Where the current itinerary starts.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// All stops, in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Index of the current stop.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current stop.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.stops[self.cursor]
    }

    /// Whether the current stop is the last one.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.cursor == self.stops.len() - 1
    }

    /// Moves to the next stop; a no-op on the last one.
    pub fn advance(&mut self) {
        if !self.at_end() {
            self.cursor += 1;
        }
    }

    /// Moves to the previous stop; a no-op on the first one.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Replans from the current stop to `new_to` and moves to its start.
    /// On error the route is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntityNotFound` if `new_to` is not available.
    pub fn reroute(&mut self, new_to: &str, available: &[String]) -> Result<(), DomainError> {
        *self = Self::plan(self.current(), new_to, available)?;
        Ok(())
    }
}
