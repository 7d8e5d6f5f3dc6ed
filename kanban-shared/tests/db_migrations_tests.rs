/// Integration tests for database migrations

use kanban_shared::db::migrations::{
    drop_database, ensure_database_exists, get_migration_status, run_migrations,
};
use kanban_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use uuid::Uuid;

#[tokio::test]
async fn test_migrations_create_schema() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    run_migrations(&pool).await.expect("Migrations failed");

    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to list tables");
    let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();

    assert_eq!(names, vec!["boards", "collaborators", "columns", "tasks", "users"]);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migration_status_on_file_database() {
    let path = std::env::temp_dir().join(format!("kanban-migrate-{}.db", Uuid::new_v4().simple()));
    let url = format!("sqlite://{}", path.display());

    ensure_database_exists(&url).await.expect("Failed to create database");

    let config = DatabaseConfig {
        url: url.clone(),
        ..Default::default()
    };
    let pool = create_pool(config).await.expect("Failed to create pool");

    run_migrations(&pool).await.expect("Migrations failed");
    run_migrations(&pool).await.expect("Second run should be a no-op");

    let status = get_migration_status(&pool).await.expect("Failed to get migration status");
    assert_eq!(status.applied_migrations, 2);
    assert!(status.is_up_to_date);

    close_pool(pool).await;
    drop_database(&url).await.expect("Failed to drop database");
    assert!(!path.exists());
}
