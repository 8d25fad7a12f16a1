use sea_orm::DatabaseConnection;

/// SeaORM-based metric storage
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

impl DatabaseBackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackendType::PostgreSQL => "postgres",
            DatabaseBackendType::SQLite => "sqlite",
        }
    }
}
