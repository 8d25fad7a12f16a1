//! Common test utilities
//!
//! - In-memory SQLite stores, bootstrapped and ready
//! - Wire payload fixtures
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{TestDatabase, backends};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     for store in backends().await {
//!         store.update_counter("hits", 1).await.unwrap();
//!     }
//! }
//! ```

pub mod database;
pub mod fixtures;

pub use database::{TestDatabase, backends};
