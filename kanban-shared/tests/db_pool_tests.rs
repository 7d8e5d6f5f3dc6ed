/// Integration tests for the SQLite connection pool
///
/// In-memory databases need no setup. File-backed tests create and remove
/// their own database in the system temp directory.

use kanban_shared::db::migrations::{drop_database, ensure_database_exists};
use kanban_shared::db::pool::{close_pool, create_pool, get_pool_stats, health_check, DatabaseConfig};
use uuid::Uuid;

fn temp_database_url() -> String {
    let path = std::env::temp_dir().join(format!("kanban-test-{}.db", Uuid::new_v4().simple()));
    format!("sqlite://{}", path.display())
}

#[tokio::test]
async fn test_create_in_memory_pool() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let stats = get_pool_stats(&pool);
    assert!(stats.total_connections > 0, "Pool should have at least one connection");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_pool_with_invalid_path() {
    let config = DatabaseConfig {
        url: "sqlite:///definitely/missing/directory/kanban.db".to_string(),
        connect_timeout_seconds: 2,
        ..DatabaseConfig::in_memory()
    };

    let result = create_pool(config).await;
    assert!(result.is_err(), "Should fail when the file cannot be created");
}

#[tokio::test]
async fn test_file_pool_creates_database() {
    let url = temp_database_url();

    let config = DatabaseConfig {
        url: url.clone(),
        max_connections: 2,
        ..Default::default()
    };
    let pool = create_pool(config).await.expect("Failed to create pool");
    health_check(&pool).await.expect("Health check should succeed");

    let row: (i64,) = sqlx::query_as("SELECT ?")
        .bind(42i64)
        .fetch_one(&pool)
        .await
        .expect("Failed to execute query");
    assert_eq!(row.0, 42);

    close_pool(pool).await;

    ensure_database_exists(&url).await.expect("Database should already exist");
    drop_database(&url).await.expect("Failed to drop database");
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let row: (i64,) = sqlx::query_as("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .expect("Failed to read pragma");
    assert_eq!(row.0, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_in_memory_pool_keeps_data_between_queries() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    sqlx::query("CREATE TABLE scratch (value INTEGER NOT NULL)")
        .execute(&pool)
        .await
        .expect("Failed to create table");
    for value in 1..=3i64 {
        sqlx::query("INSERT INTO scratch (value) VALUES (?)")
            .bind(value)
            .execute(&pool)
            .await
            .expect("Failed to insert");
    }

    let sum: (i64,) = sqlx::query_as("SELECT SUM(value) FROM scratch")
        .fetch_one(&pool)
        .await
        .expect("Failed to sum");
    assert_eq!(sum.0, 6);
    assert_eq!(get_pool_stats(&pool).total_connections, 1);

    close_pool(pool).await;
}
