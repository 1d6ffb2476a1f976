//! Repository Module
//!
//! Per-collection access to the document store. [`Repository<T>`] gives the
//! generic `find_all / find_by_id / insert / delete` operations for any
//! [`Record`]; collection-specific operations (search, merge updates,
//! uniqueness checks) live in the sibling modules.

pub mod order;
pub mod product;
pub mod user;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::{UserChanges, UserRepository};

use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

use super::{Record, Store, StoreError};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] StoreError),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        use shared::{AppError, ErrorCode};
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Duplicate(what) => {
                AppError::with_message(ErrorCode::AlreadyExists, format!("{} already exists", what))
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(e) => e.into(),
        }
    }
}

/// Generic repository over one collection
#[derive(Debug)]
pub struct Repository<T> {
    store: Arc<Store>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// All records, insertion order
    pub fn find_all(&self) -> Vec<T> {
        self.store.read(|doc| T::items(doc).clone())
    }

    pub fn find_by_id(&self, key: &str) -> Option<T> {
        self.store
            .read(|doc| T::items(doc).iter().find(|r| r.key() == key).cloned())
    }

    /// Records matching a predicate, insertion order
    pub fn find_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.store.read(|doc| {
            T::items(doc)
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect()
        })
    }

    /// Append a record; fails if its key is taken
    pub fn insert(&self, record: T) -> RepoResult<T> {
        self.store.write(|doc| {
            let items = T::items_mut(doc);
            if items.iter().any(|r| r.key() == record.key()) {
                return Err(RepoError::Duplicate(format!(
                    "{} {}",
                    T::COLLECTION,
                    record.key()
                )));
            }
            items.push(record.clone());
            Ok(record)
        })
    }

    /// Remove a record by key, returning it
    pub fn delete(&self, key: &str) -> RepoResult<T> {
        self.store.write(|doc| {
            let items = T::items_mut(doc);
            let index = items
                .iter()
                .position(|r| r.key() == key)
                .ok_or_else(|| RepoError::NotFound(format!("{} {}", T::COLLECTION, key)))?;
            Ok(items.remove(index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBackend;
    use rust_decimal::Decimal;
    use shared::models::Product;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: Decimal::new(500, 2),
            categories: vec!["misc".to_string()],
            on_hand: 3,
            description: "test".to_string(),
        }
    }

    #[test]
    fn test_insert_find_delete() {
        let repo: Repository<Product> = Repository::new(Arc::new(Store::open(MemoryBackend::new())));

        repo.insert(product("1")).unwrap();
        repo.insert(product("2")).unwrap();
        assert!(matches!(repo.insert(product("1")), Err(RepoError::Duplicate(_))));

        assert_eq!(repo.find_all().len(), 2);
        assert_eq!(repo.find_by_id("2").unwrap().name, "Product 2");
        assert!(repo.find_by_id("9").is_none());

        let deleted = repo.delete("1").unwrap();
        assert_eq!(deleted.id, "1");
        assert!(matches!(repo.delete("1"), Err(RepoError::NotFound(_))));
        assert_eq!(repo.find_all().len(), 1);
    }

    #[test]
    fn test_find_where_preserves_order() {
        let repo: Repository<Product> = Repository::new(Arc::new(Store::open(MemoryBackend::new())));
        for id in ["3", "1", "2"] {
            repo.insert(product(id)).unwrap();
        }
        let ids: Vec<String> = repo
            .find_where(|p| p.id != "1")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["3", "2"]);
    }
}
