//! Relational storage backend using SeaORM
//!
//! PostgreSQL keeps the tables in the `metrics` schema; SQLite keeps them
//! in the main schema.

/// Database entities module
pub mod entities;
/// Schema bootstrap module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{DatabaseBackendType, connect_with_retry};
