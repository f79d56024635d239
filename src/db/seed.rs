//! Database (re)initialization.

use crate::domain::SEED_USERS;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::Path;
use tracing::info;

/// Delete `db_path`, recreate it and seed the `users` table.
///
/// Every run leaves the same two rows with ids 1 and 2.
pub async fn reset_database(db_path: &str) -> Result<(), sqlx::Error> {
    let path = Path::new(db_path);
    if path.exists() {
        info!("Removing existing database at {}", db_path);
        std::fs::remove_file(path)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    let seeded = run_init_script(&mut conn).await;
    conn.close().await?;
    let inserted = seeded?;

    info!("Database initialized at {} with {} users", db_path, inserted);
    Ok(())
}

/// Recreate the schema and insert the seed rows in one transaction.
async fn run_init_script(conn: &mut SqliteConnection) -> Result<usize, sqlx::Error> {
    let schema_sql = include_str!("schema.sql");
    let mut tx = conn.begin().await?;

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(&mut *tx).await?;
        }
    }

    for seed in SEED_USERS.iter() {
        sqlx::query("INSERT INTO users (username, email) VALUES (?, ?)")
            .bind(seed.username)
            .bind(seed.email)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(SEED_USERS.len())
}
