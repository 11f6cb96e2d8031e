//! SQLite database adapters for the exam scheduling engine.

pub mod candidate_repository;
pub mod catalog_finder;
pub mod connection;
pub mod exam_gateway;
pub mod migrations;
pub mod run_store;

pub use candidate_repository::SqliteCandidateRepository;
pub use catalog_finder::SqliteCatalogFinder;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use exam_gateway::SqliteExamGateway;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use run_store::SqliteRunStore;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a JSON-encoded id list from a SQLite row field.
pub fn parse_id_list(s: &str) -> DomainResult<Vec<i64>> {
    serde_json::from_str(s).map_err(|e| DomainError::SerializationError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Open the scheduler database with the configured pool sizing and
/// bring its schema up to date.
pub async fn initialize_database(
    database_url: &str,
    pool_config: PoolConfig,
) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, pool_config).await?;
    let migrator = Migrator::new(pool.clone());
    migrator
        .run_embedded_migrations(all_embedded_migrations())
        .await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator
        .run_embedded_migrations(all_embedded_migrations())
        .await?;
    Ok(pool)
}
