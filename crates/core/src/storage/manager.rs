use crate::errors::CoreError;
use crate::models::state::PersistedState;

use super::backend::KeyValueStorage;
use super::format;

/// High-level storage operations: encode/decode the persisted state and
/// move it through a key-value backend as one blob.
pub struct StorageManager;

impl StorageManager {
    /// Flow: PersistedState → versioned envelope → JSON string
    pub fn save_to_string(state: &PersistedState) -> Result<String, CoreError> {
        format::write_blob(state)
    }

    /// Flow: JSON string → version check → PersistedState (outputs re-derived)
    pub fn load_from_str(blob: &str) -> Result<PersistedState, CoreError> {
        format::read_blob(blob)
    }

    /// Rewrite the whole blob under `key`.
    pub async fn persist(
        storage: &dyn KeyValueStorage,
        key: &str,
        state: &PersistedState,
    ) -> Result<(), CoreError> {
        let blob = Self::save_to_string(state)?;
        storage.set_item(key, &blob).await.map_err(|e| {
            tracing::warn!(backend = storage.name(), key, error = %e, "failed to persist store");
            match e {
                CoreError::Storage(_) => e,
                other => CoreError::Storage(other.to_string()),
            }
        })?;
        tracing::debug!(
            backend = storage.name(),
            key,
            bytes = blob.len(),
            records = state.saved_calculations.len(),
            "persisted store"
        );
        Ok(())
    }

    /// Read the blob under `key`. A missing blob yields an empty state.
    pub async fn restore(
        storage: &dyn KeyValueStorage,
        key: &str,
    ) -> Result<PersistedState, CoreError> {
        match storage.get_item(key).await? {
            Some(blob) => {
                let state = Self::load_from_str(&blob)?;
                tracing::debug!(
                    backend = storage.name(),
                    key,
                    records = state.saved_calculations.len(),
                    "restored store"
                );
                Ok(state)
            }
            None => Ok(PersistedState::default()),
        }
    }
}
