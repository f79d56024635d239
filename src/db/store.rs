//! Read access to the `users` table, one connection per call.

use crate::config::QueryMode;
use crate::domain::{User, UserFilter, UserId};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tracing::{debug, warn};

const SELECT_USERS: &str = "SELECT id, username, email FROM users";
const SELECT_USER_BY_ID: &str = "SELECT id, username, email FROM users WHERE id = ?";

/// Opens a fresh connection for every lookup and closes it before returning.
#[derive(Debug, Clone)]
pub struct UserStore {
    options: SqliteConnectOptions,
    query_mode: QueryMode,
}

impl UserStore {
    /// Connections are read-only and never create the file; a missing file
    /// fails the lookup and any write smuggled into a query is refused.
    pub fn new(db_path: &str, query_mode: QueryMode) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(false)
            .read_only(true);
        UserStore {
            options,
            query_mode,
        }
    }

    /// Fetch the rows selected by `filter`, in storage order.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the query fails.
    pub async fn fetch_users(&self, filter: &UserFilter) -> Result<Vec<User>, sqlx::Error> {
        let mut conn = SqliteConnection::connect_with(&self.options).await?;

        let result = self.run_query(&mut conn, filter).await;

        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection: {}", e);
        }

        result
    }

    async fn run_query(
        &self,
        conn: &mut SqliteConnection,
        filter: &UserFilter,
    ) -> Result<Vec<User>, sqlx::Error> {
        let rows = match (filter, self.query_mode) {
            (UserFilter::All, _) => sqlx::query(SELECT_USERS).fetch_all(&mut *conn).await?,
            (UserFilter::ById(raw), QueryMode::Parameterized) => {
                let id = match UserId::parse(raw) {
                    Ok(id) => id,
                    Err(e) => {
                        debug!("{}; treating as no match", e);
                        return Ok(Vec::new());
                    }
                };
                sqlx::query(SELECT_USER_BY_ID)
                    .bind(id.as_i64())
                    .fetch_all(&mut *conn)
                    .await?
            }
            (UserFilter::ById(raw), QueryMode::Concatenated) => {
                // Injection path: `raw` becomes part of the SQL text.
                let sql = format!("{} WHERE id = '{}'", SELECT_USERS, raw);
                debug!("Executing unbound query: {}", sql);
                sqlx::query(&sql).fetch_all(&mut *conn).await?
            }
        };

        rows.iter().map(user_from_row).collect()
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::reset_database;
    use tempfile::TempDir;

    async fn seeded_store(query_mode: QueryMode) -> (UserStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        reset_database(&db_path).await.expect("reset failed");
        (UserStore::new(&db_path, query_mode), temp_dir)
    }

    fn usernames(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.username.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_in_insertion_order() {
        let (store, _temp) = seeded_store(QueryMode::Parameterized).await;
        let users = store.fetch_users(&UserFilter::All).await.unwrap();
        assert_eq!(
            users,
            vec![
                User::new(1, "alice", "alice@example.com"),
                User::new(2, "bob", "bob@example.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_id_both_modes() {
        for mode in [QueryMode::Parameterized, QueryMode::Concatenated] {
            let (store, _temp) = seeded_store(mode).await;
            let users = store
                .fetch_users(&UserFilter::ById("2".to_string()))
                .await
                .unwrap();
            assert_eq!(usernames(&users), vec!["bob"], "mode {}", mode);
        }
    }

    #[tokio::test]
    async fn test_non_integer_id_is_no_match_when_parameterized() {
        let (store, _temp) = seeded_store(QueryMode::Parameterized).await;
        for raw in ["abc", "' OR '1'='1", "1'"] {
            let users = store
                .fetch_users(&UserFilter::ById(raw.to_string()))
                .await
                .unwrap();
            assert!(users.is_empty(), "input {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_injection_returns_all_rows_when_concatenated() {
        let (store, _temp) = seeded_store(QueryMode::Concatenated).await;
        let users = store
            .fetch_users(&UserFilter::ById("' OR '1'='1".to_string()))
            .await
            .unwrap();
        assert_eq!(usernames(&users), vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_broken_injected_sql_is_an_error() {
        let (store, _temp) = seeded_store(QueryMode::Concatenated).await;
        let result = store
            .fetch_users(&UserFilter::ById("1'".to_string()))
            .await;
        assert!(result.is_err());
    }

    async fn row_count(store: &UserStore) -> usize {
        store.fetch_users(&UserFilter::All).await.unwrap().len()
    }

    #[tokio::test]
    async fn test_stacked_write_is_refused_when_concatenated() {
        let (store, _temp) = seeded_store(QueryMode::Concatenated).await;
        for raw in ["1'; DELETE FROM users; --", "1'; DROP TABLE users; --"] {
            let result = store
                .fetch_users(&UserFilter::ById(raw.to_string()))
                .await;
            assert!(result.is_err(), "input {:?}", raw);
        }
        assert_eq!(row_count(&store).await, 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_created() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("absent.db");
        let store = UserStore::new(&db_path.to_string_lossy(), QueryMode::Parameterized);

        let err = store.fetch_users(&UserFilter::All).await.unwrap_err();
        assert!(matches!(
            crate::error::AppError::from(err),
            crate::error::AppError::StorageUnavailable(_)
        ));
        assert!(!db_path.exists());
    }
}
