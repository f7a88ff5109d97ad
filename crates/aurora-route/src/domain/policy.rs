//! Stop planning.
//!
//! A route visits every entity between its endpoints in catalog order,
//! endpoints included. Walking "backwards" through the catalog yields the
//! same slice reversed.

use aurora_core::error::DomainError;

fn position(slug: &str, available: &[String]) -> Result<usize, DomainError> {
    available
        .iter()
        .position(|s| s == slug)
        .ok_or_else(|| DomainError::EntityNotFound(slug.to_owned()))
}

/// Plans the stops from `from` to `to` over the catalog order `available`.
///
/// The result starts with `from`, ends with `to`, and is `[from]` when the
/// two are equal.
///
/// # Errors
///
/// Returns `DomainError::EntityNotFound` if either slug is not available.
pub fn plan_stops(from: &str, to: &str, available: &[String]) -> Result<Vec<String>, DomainError> {
    let start = position(from, available)?;
    let end = position(to, available)?;
    let stops = if start <= end {
        available[start..=end].to_vec()
    } else {
        available[end..=start].iter().rev().cloned().collect()
    };
    Ok(stops)
}
