//! Storage backends
//!
//! A backend only knows how to load and save a whole [`Document`].
//! Everything above it works on the in-memory copy held by [`Store`](super::Store).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::{Document, StoreError};

/// Persistence seam for the document store
pub trait StorageBackend: Send + Sync {
    /// Load the stored document; `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<Document>, StoreError>;

    /// Replace the stored document
    fn save(&self, doc: &Document) -> Result<(), StoreError>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        (**self).load()
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        (**self).save(doc)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Pretty-printed JSON file, written atomically (tmp file + rename)
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "database.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let doc = serde_json::from_str(&raw)?;
        Ok(Some(doc))
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(doc)?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for tests
///
/// Saves can be made to fail on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Option<Document>>,
    fail_saves: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already persisted document
    pub fn with_document(doc: Document) -> Self {
        Self {
            saved: Mutex::new(Some(doc)),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Last successfully saved document
    pub fn saved(&self) -> Option<Document> {
        self.saved.lock().clone()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Persist("memory backend refused the write".into()));
        }
        *self.saved.lock() = Some(doc.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
