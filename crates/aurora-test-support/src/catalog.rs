//! Catalog fixtures.

use aurora_catalog::domain::catalog::Catalog;
use aurora_catalog::domain::entity::{Entity, Section};

/// Builds a minimal entity whose primary section mentions its title.
#[must_use]
pub fn entity(slug: &str) -> Entity {
    let mut title = slug.to_owned();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Entity {
        sections: vec![Section {
            md: format!("{title} is part of the solar system."),
        }],
        slug: slug.to_owned(),
        title,
        hero_color: "#888888".to_owned(),
        tags: vec![],
        sources: vec![],
        facts: None,
    }
}

/// The Sun, the eight planets and Pluto, in order from the Sun.
///
/// # Panics
///
/// Never: the fixture slugs are unique.
#[must_use]
pub fn solar_system() -> Catalog {
    Catalog::from_entities(
        [
            "sun", "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus",
            "neptune", "pluto",
        ]
        .into_iter()
        .map(entity)
        .collect(),
    )
    .expect("fixture slugs are unique")
}
