// customui-core/src/storage.rs
//! Single-value durable stores for the serialized customization state.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("corrupt state: {0}")]
    Corrupt(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A single-value durable store
pub trait BlobStore: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// The stored blob, `None` when nothing was ever written
    ///
    /// Callers treat an empty blob the same as `None`.
    fn read(&self) -> StorageResult<Option<String>>;

    /// Replace the stored blob
    fn write(&self, blob: &str) -> StorageResult<()>;
}

/// In-memory store for tests and ephemeral sessions
///
/// Clones share the same blob, so a test can keep a handle after giving
/// one to a [`crate::Customizer`].
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blob: Arc<RwLock<Option<String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(RwLock::new(Some(blob.into()))),
        }
    }

    /// Current contents
    pub fn blob(&self) -> Option<String> {
        self.blob
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &str {
        "MemoryBlobStore"
    }

    fn read(&self) -> StorageResult<Option<String>> {
        Ok(self.blob())
    }

    fn write(&self, blob: &str) -> StorageResult<()> {
        *self.blob.write().unwrap_or_else(PoisonError::into_inner) = Some(blob.to_string());
        Ok(())
    }
}

impl fmt::Debug for MemoryBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.blob().map(|b| b.len());
        f.debug_struct("MemoryBlobStore").field("len", &len).finish()
    }
}

/// File-backed store
///
/// Writes go to `{path}.tmp` first and are renamed over the target, so a
/// crash mid-write leaves the previous blob in place.
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    /// The file does not need to exist until the first write
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<data_dir>/customui/ui.json`, or `./ui.json` without a data dir
    pub fn default_location() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("customui").join("ui.json"))
            .unwrap_or_else(|| PathBuf::from("ui.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl BlobStore for FileBlobStore {
    fn name(&self) -> &str {
        "FileBlobStore"
    }

    fn read(&self) -> StorageResult<Option<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(format!("state file is not UTF-8: {e}")))
    }

    fn write(&self, blob: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.temp_path();
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(blob.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), bytes = blob.len(), "wrote state blob");
        Ok(())
    }
}

impl fmt::Debug for FileBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBlobStore")
            .field("path", &self.path)
            .finish()
    }
}
