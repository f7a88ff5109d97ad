//! Persistent key-value store abstraction.
//!
//! Values are JSON documents. The typed helpers treat an undecodable value
//! as absent: everything kept in the store is re-derivable, so a corrupt
//! entry degrades into a cache miss instead of an error.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::DomainError;

/// String-keyed store of JSON values surviving restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DomainError>;
}

/// Reads and decodes the value under `key`.
///
/// # Errors
///
/// Returns `DomainError` if the store itself fails. Decoding failures are
/// logged and reported as `Ok(None)`.
pub async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, DomainError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_value(raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "ignoring undecodable store value");
            Ok(None)
        }
    }
}

/// Encodes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if encoding fails, or the store's
/// own error if the write fails.
pub async fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), DomainError> {
    let raw = serde_json::to_value(value)
        .map_err(|e| DomainError::Infrastructure(format!("value serialization failed: {e}")))?;
    store.set(key, raw).await
}
