use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::CoreError;

/// Device key-value storage holding string blobs (the async-storage model).
///
/// Hosts plug in their platform store; the library ships an in-memory
/// implementation and, on native targets, a directory-backed one.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait KeyValueStorage: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Read the blob stored under `key`, or `None` if nothing was written yet.
    async fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Replace the blob stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete the blob stored under `key`. Missing keys are not an error.
    async fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local storage. Useful for tests and for hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the blob under `key`, without going through the async API.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.items
            .lock()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".into()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl KeyValueStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory (native only).
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so a crash mid-write leaves the previous blob intact.
///
/// The file calls are blocking `std::fs` operations run inside the async
/// methods. The blob is small and written by one caller at a time; hosts
/// running on a multi-threaded executor that cannot afford a short block
/// should wrap this in their runtime's blocking pool or provide their own
/// `KeyValueStorage`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<std::path::PathBuf, CoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(CoreError::Storage(format!("Invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl KeyValueStorage for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
