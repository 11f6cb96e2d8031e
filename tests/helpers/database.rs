use sqlx::SqlitePool;

use examsched::adapters::sqlite::create_migrated_test_pool;

/// Create an in-memory SQLite database for testing.
///
/// Creates a fresh in-memory database with migrations applied.
/// Each call creates a completely isolated database instance.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create test database")
}

/// Teardown test database.
///
/// Closes the connection pool and cleans up resources.
pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}
