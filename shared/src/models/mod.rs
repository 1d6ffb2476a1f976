//! Data models
//!
//! Persisted records and request payloads shared between shop-server and
//! its clients. All ids are strings (`"1"`, `"2"`, ...).

pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use order::*;
pub use product::*;
pub use user::*;
