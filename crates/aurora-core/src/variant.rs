//! Narrative style variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed, ordered narrative styles used to vary generated tour
/// text across repeat visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    /// Adventurous, first-person framing.
    Explorer,
    /// Measurement- and mechanism-focused framing.
    Scientist,
    /// Narrative, history-flavoured framing.
    Storyteller,
}

impl StyleVariant {
    /// All variants in rotation order.
    pub const ALL: [Self; 3] = [Self::Explorer, Self::Scientist, Self::Storyteller];

    /// Selects the variant for a visit: `visit_count mod 3`, where
    /// `visit_count` is the number of tours already started for the entity.
    #[must_use]
    pub fn for_visit_count(visit_count: u64) -> Self {
        // The modulus is 3, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let index = (visit_count % Self::ALL.len() as u64) as usize;
        Self::ALL[index]
    }

    /// Position of this variant in rotation order.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Explorer => 0,
            Self::Scientist => 1,
            Self::Storyteller => 2,
        }
    }

    /// The lowercase tag sent to the generation gateway.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Explorer => "explorer",
            Self::Scientist => "scientist",
            Self::Storyteller => "storyteller",
        }
    }
}

impl fmt::Display for StyleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_visit_count_rotates_through_all_variants() {
        let picked: Vec<StyleVariant> = (0..4).map(StyleVariant::for_visit_count).collect();

        assert_eq!(
            picked,
            vec![
                StyleVariant::Explorer,
                StyleVariant::Scientist,
                StyleVariant::Storyteller,
                StyleVariant::Explorer,
            ]
        );
    }

    #[test]
    fn test_index_matches_rotation_order() {
        for (i, variant) in StyleVariant::ALL.iter().enumerate() {
            assert_eq!(variant.index(), i);
        }
    }

    #[test]
    fn test_serializes_as_lowercase_tag() {
        let json = serde_json::to_value(StyleVariant::Scientist).unwrap();

        assert_eq!(json, serde_json::json!("scientist"));
    }
}
