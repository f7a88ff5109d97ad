//! Celestial-body records.

use std::collections::BTreeMap;

use pulldown_cmark::{Event, Parser, TagEnd, html};
use serde::{Deserialize, Serialize};

/// One Markdown section of an entity page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Markdown body.
    pub md: String,
}

impl Section {
    /// Renders the section to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.md.len() * 3 / 2);
        html::push_html(&mut out, Parser::new(&self.md));
        out
    }

    /// The section's text with Markdown syntax removed. Blocks are joined
    /// with a single space.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.md.len());
        for event in Parser::new(&self.md) {
            match event {
                Event::Text(text) | Event::Code(text) => out.push_str(&text),
                Event::SoftBreak | Event::HardBreak => out.push(' '),
                Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
                _ => {}
            }
        }
        out.trim_end().to_owned()
    }
}

/// A celestial body. Identity is the slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique, stable key.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Accent colour used by the card and the 3D scene, e.g. `#c1440e`.
    pub hero_color: String,
    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered page sections; the first is the primary section.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Reference URLs.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Optional numeric attributes, e.g. `radius_km`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<BTreeMap<String, f64>>,
}

impl Entity {
    /// Markdown of the primary section, or empty when the entity has none.
    /// This is the context text handed to the generation gateway.
    #[must_use]
    pub fn primary_context(&self) -> &str {
        self.sections.first().map_or("", |s| s.md.as_str())
    }
}
