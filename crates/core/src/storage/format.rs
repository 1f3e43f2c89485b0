use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::state::PersistedState;

/// Current blob format version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned wrapper stored under the storage key:
///
/// ```text
/// {"state": {"selectedCalculator": ..., "savedCalculations": [...]}, "version": 1}
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<S> {
    pub state: S,
    pub version: u32,
}

/// Encode the persisted state as a JSON blob.
pub fn write_blob(state: &PersistedState) -> Result<String, CoreError> {
    let envelope = Envelope {
        state,
        version: CURRENT_VERSION,
    };
    serde_json::to_string(&envelope)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))
}

/// Decode a JSON blob, checking the version before touching the state.
pub fn read_blob(blob: &str) -> Result<PersistedState, CoreError> {
    if blob.trim().is_empty() {
        return Err(CoreError::InvalidFileFormat("Stored blob is empty".into()));
    }

    // Peek at the version first so a newer format is reported as such,
    // not as a confusing field-level error.
    let header: Envelope<serde::de::IgnoredAny> = serde_json::from_str(blob)
        .map_err(|e| CoreError::InvalidFileFormat(format!("Not a store blob: {e}")))?;

    if header.version == 0 || header.version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(header.version));
    }

    let envelope: Envelope<PersistedState> = serde_json::from_str(blob)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize store: {e}")))?;

    Ok(envelope.state)
}
