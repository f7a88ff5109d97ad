//! User preferences kept in the key-value store.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::keys;
use crate::store::{self, KeyValueStore};

/// Sound and narration preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Sound effects are muted.
    pub muted: bool,
    /// Tour steps are read aloud.
    pub narration_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            muted: false,
            narration_enabled: true,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PreferencesPatch {
    /// New mute flag.
    pub muted: Option<bool>,
    /// New narration flag.
    pub narration_enabled: Option<bool>,
}

/// Reads whether narration is enabled (default `true`).
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn narration_enabled(store: &dyn KeyValueStore) -> Result<bool, DomainError> {
    Ok(store::load(store, &keys::narration_enabled())
        .await?
        .unwrap_or(Preferences::default().narration_enabled))
}

/// Reads all preferences, falling back to defaults for missing keys.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn load(store: &dyn KeyValueStore) -> Result<Preferences, DomainError> {
    let defaults = Preferences::default();
    Ok(Preferences {
        muted: store::load(store, &keys::muted())
            .await?
            .unwrap_or(defaults.muted),
        narration_enabled: narration_enabled(store).await?,
    })
}

/// Applies `patch` and returns the resulting preferences.
///
/// # Errors
///
/// Returns `DomainError` if the store fails.
pub async fn update(
    store: &dyn KeyValueStore,
    patch: PreferencesPatch,
) -> Result<Preferences, DomainError> {
    if let Some(muted) = patch.muted {
        store::save(store, &keys::muted(), &muted).await?;
    }
    if let Some(enabled) = patch.narration_enabled {
        store::save(store, &keys::narration_enabled(), &enabled).await?;
    }
    load(store).await
}
