use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_KEY_FILE: &str = "api.key";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read key file: {0}")]
    Read(String),

    #[error("Failed to write key file: {0}")]
    Write(String),

    #[error("Failed to delete key file: {0}")]
    Delete(String),
}

/// Plaintext credential file. The whole trimmed file content is the key;
/// writes overwrite in place with no locking.
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Returns the stored key, or `None` when the file is missing or empty.
    pub fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            info!("Key file {:?} not found", self.path);
            return Ok(None);
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| StoreError::Read(e.to_string()))?;
        let key = contents.trim();

        if key.is_empty() {
            info!("Key file {:?} is empty", self.path);
            Ok(None)
        } else {
            debug!("Loaded key from {:?}", self.path);
            Ok(Some(key.to_string()))
        }
    }

    pub fn save(&self, key: &str) -> Result<(), StoreError> {
        fs::write(&self.path, key).map_err(|e| StoreError::Write(e.to_string()))?;
        info!("Saved key to {:?}", self.path);
        Ok(())
    }

    /// Removes the key file; missing file is a no-op.
    pub fn delete(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| StoreError::Delete(e.to_string()))?;
            info!("Deleted key file {:?}", self.path);
        } else {
            debug!("Key file {:?} already absent", self.path);
        }
        Ok(())
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_FILE)
    }
}
