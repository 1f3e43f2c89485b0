use serde::{Deserialize, Serialize};

/// Key under which the whole persisted state blob is stored.
pub const DEFAULT_STORAGE_KEY: &str = "stock-calculator-storage";

/// Default upper bound on saved-calculation label length (in characters).
pub const DEFAULT_MAX_LABEL_LEN: usize = 60;

/// Host-supplied engine settings. Not persisted with the saved calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Storage key for the persisted blob.
    pub storage_key: String,

    /// Maximum number of characters allowed in a calculation label.
    pub max_label_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}
