//! Document store
//!
//! [`Store`] owns the only in-memory copy of the [`Document`]. All writes are
//! serialized through one mutex: a mutation runs against a working copy, the
//! copy is persisted, and only then does it replace the live document. A
//! failed save therefore leaves memory exactly as it was on disk.

use parking_lot::Mutex;

use super::{Document, StorageBackend, StoreError};

pub struct Store {
    backend: Box<dyn StorageBackend>,
    doc: Mutex<Document>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend.describe())
            .finish()
    }
}

impl Store {
    /// Open the store, loading the persisted document
    ///
    /// Fails open: an unreadable or unparsable document is logged and
    /// replaced by three empty collections. A missing document starts empty.
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        let location = backend.describe();
        let doc = match backend.load() {
            Ok(Some(doc)) => {
                tracing::info!(
                    location = %location,
                    products = doc.products.len(),
                    users = doc.users.len(),
                    orders = doc.orders.len(),
                    "Database loaded"
                );
                doc
            }
            Ok(None) => {
                tracing::info!(location = %location, "No database found, starting empty");
                Document::default()
            }
            Err(e) => {
                tracing::error!(
                    location = %location,
                    error = %e,
                    "Failed to load database, starting empty"
                );
                Document::default()
            }
        };

        Self {
            backend: Box::new(backend),
            doc: Mutex::new(doc),
        }
    }

    /// Run a read-only closure against the current document
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let doc = self.doc.lock();
        f(&doc)
    }

    /// Clone of the current document
    pub fn snapshot(&self) -> Document {
        self.doc.lock().clone()
    }

    /// Apply a mutation atomically
    ///
    /// `f` works on a copy of the document. If it returns `Err`, nothing
    /// changes. If it returns `Ok`, the copy is saved through the backend and
    /// published; a save failure discards the copy and returns the error.
    pub fn write<R, E>(&self, f: impl FnOnce(&mut Document) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut live = self.doc.lock();
        let mut working = live.clone();
        let result = f(&mut working)?;

        if let Err(e) = self.backend.save(&working) {
            tracing::error!(error = %e, "Failed to persist database");
            return Err(e.into());
        }

        *live = working;
        Ok(result)
    }

    /// Replace the whole document (seeding)
    pub fn replace(&self, doc: Document) -> Result<(), StoreError> {
        self.write(|current| {
            *current = doc;
            Ok(())
        })
    }
}
