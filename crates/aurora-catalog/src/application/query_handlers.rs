//! Query handlers for the Entity Catalog.
//!
//! Read-only view DTOs for the card grid and the entity detail panel.

use std::collections::BTreeMap;

use aurora_core::error::DomainError;
use serde::Serialize;

use crate::domain::catalog::Catalog;
use crate::domain::entity::Entity;

/// Card-grid view of an entity.
#[derive(Debug, Serialize)]
pub struct EntitySummaryView {
    /// Entity slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Accent colour.
    pub hero_color: String,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Plain-text excerpt of the primary section.
    pub excerpt: String,
}

/// Detail-panel view of an entity.
#[derive(Debug, Serialize)]
pub struct EntityDetailView {
    /// Entity slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Accent colour.
    pub hero_color: String,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Sections rendered to HTML, in order.
    pub sections_html: Vec<String>,
    /// Reference URLs.
    pub sources: Vec<String>,
    /// Numeric attributes.
    pub facts: BTreeMap<String, f64>,
}

fn summary(entity: &Entity) -> EntitySummaryView {
    EntitySummaryView {
        slug: entity.slug.clone(),
        title: entity.title.clone(),
        hero_color: entity.hero_color.clone(),
        tags: entity.tags.clone(),
        excerpt: entity
            .sections
            .first()
            .map(crate::domain::entity::Section::plain_text)
            .unwrap_or_default(),
    }
}

/// Lists every entity in catalog order.
#[must_use]
pub fn list_entities(catalog: &Catalog) -> Vec<EntitySummaryView> {
    catalog.iter().map(summary).collect()
}

/// Retrieves the detail view of one entity.
///
/// # Errors
///
/// Returns `DomainError::EntityNotFound` if no entity has `slug`.
pub fn get_entity_by_slug(catalog: &Catalog, slug: &str) -> Result<EntityDetailView, DomainError> {
    let entity = catalog.require(slug)?;
    Ok(EntityDetailView {
        slug: entity.slug.clone(),
        title: entity.title.clone(),
        hero_color: entity.hero_color.clone(),
        tags: entity.tags.clone(),
        sections_html: entity.sections.iter().map(|s| s.to_html()).collect(),
        sources: entity.sources.clone(),
        facts: entity.facts.clone().unwrap_or_default(),
    })
}
