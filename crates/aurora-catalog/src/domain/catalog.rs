//! The immutable entity collection.

use std::collections::HashMap;

use aurora_core::error::DomainError;

use super::entity::Entity;

/// Ordered collection of entities with slug lookup. Catalog order is the
/// order of the source document and drives route planning.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: Vec<Entity>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a slug is empty or appears twice.
    pub fn from_entities(entities: Vec<Entity>) -> Result<Self, DomainError> {
        let mut by_slug = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            if entity.slug.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "entity at position {position} has an empty slug"
                )));
            }
            if by_slug.insert(entity.slug.clone(), position).is_some() {
                return Err(DomainError::Validation(format!(
                    "duplicate slug: {}",
                    entity.slug
                )));
            }
        }
        Ok(Self { entities, by_slug })
    }

    /// Looks up an entity by slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Entity> {
        self.by_slug.get(slug).map(|&i| &self.entities[i])
    }

    /// Looks up an entity by slug, failing when it is unknown.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntityNotFound` if no entity has `slug`.
    pub fn require(&self, slug: &str) -> Result<&Entity, DomainError> {
        self.get(slug)
            .ok_or_else(|| DomainError::EntityNotFound(slug.to_owned()))
    }

    /// All slugs in catalog order.
    #[must_use]
    pub fn slugs(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.slug.clone()).collect()
    }

    /// Iterates over entities in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
