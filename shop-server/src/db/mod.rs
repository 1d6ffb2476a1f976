//! 数据层 - JSON 文档存储
//!
//! The whole database is one JSON document with three collections:
//!
//! ```json
//! { "products": [...], "users": [...], "orders": [...] }
//! ```
//!
//! - [`StorageBackend`] - persistence seam (file, memory)
//! - [`Store`] - single-writer owner of the in-memory document
//! - [`repository`] - per-collection access

pub mod backend;
pub mod record;
pub mod repository;
pub mod seed;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use record::{Record, generate_id};
pub use store::Store;

use serde::{Deserialize, Serialize};
use shared::models::{Order, Product, User};
use thiserror::Error;

/// The persisted document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Document {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Persist failed: {0}")]
    Persist(String),
}

impl From<StoreError> for shared::AppError {
    fn from(err: StoreError) -> Self {
        shared::AppError::database(err.to_string())
    }
}
