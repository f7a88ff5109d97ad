//! Persistent key schema.
//!
//! Every key the application writes is built here so the layout stays in
//! one place:
//!
//! | key | value |
//! |---|---|
//! | `aurora:pref:muted` | `bool` |
//! | `aurora:pref:narration` | `bool` |
//! | `aurora:visits:{slug}` | `u64` |
//! | `aurora:tour:{slug}:v{variant}` | `[string]` |
//! | `aurora:usedfacts:{slug}` | `[string]`, at most 60 |

use crate::variant::StyleVariant;

/// Namespace prefix shared by all keys.
pub const PREFIX: &str = "aurora";

/// Key of the sound-effects mute flag.
#[must_use]
pub fn muted() -> String {
    format!("{PREFIX}:pref:muted")
}

/// Key of the narration-enabled flag.
#[must_use]
pub fn narration_enabled() -> String {
    format!("{PREFIX}:pref:narration")
}

/// Key of the visit counter for `slug`.
#[must_use]
pub fn visits(slug: &str) -> String {
    format!("{PREFIX}:visits:{slug}")
}

/// Key of the cached tour steps for `slug` in `variant`.
#[must_use]
pub fn tour_steps(slug: &str, variant: StyleVariant) -> String {
    format!("{PREFIX}:tour:{slug}:v{}", variant.index())
}

/// Key of the used-facts ledger for `slug`.
#[must_use]
pub fn used_facts(slug: &str) -> String {
    format!("{PREFIX}:usedfacts:{slug}")
}
