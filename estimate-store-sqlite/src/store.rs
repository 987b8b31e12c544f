use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use estimate_core::{KeyValueStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

/// [`KeyValueStore`] backed by a single SQLite table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database named by `connection_string`.
    ///
    /// * `":memory:"` opens a private in-memory database on a single
    ///   connection, so every query sees the same data.
    /// * A `sqlite:` URL is used as-is.
    /// * Anything else is a file path; the file is created if missing.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let pool = if connection_string == ":memory:" {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
                .await
        } else {
            let options = if connection_string.starts_with("sqlite:") {
                SqliteConnectOptions::from_str(connection_string)?
            } else {
                SqliteConnectOptions::new()
                    .filename(connection_string)
                    .create_if_missing(true)
            };
            SqlitePoolOptions::new().connect_with(options).await
        }
        .with_context(|| format!("Failed to connect to database: {}", connection_string))?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key, found = value.is_some(), "kv_store read");
        Ok(value)
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(key, bytes = value.len(), "kv_store write");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn setup_test_store() -> SqliteStore {
        let store = SqliteStore::new(":memory:")
            .await
            .expect("Failed to create in-memory database");
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_test_store().await;

        let value = store.get("absent").await.unwrap();

        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = setup_test_store().await;

        store.set("estimate_coefficients", r#"{"sm":"0.06"}"#).await.unwrap();
        let value = store.get("estimate_coefficients").await.unwrap();

        assert_eq!(value.as_deref(), Some(r#"{"sm":"0.06"}"#));
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let store = setup_test_store().await;

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = setup_test_store().await;

        store.set("estimate_coefficients:a", "A").await.unwrap();
        store.set("estimate_coefficients:b", "B").await.unwrap();

        assert_eq!(store.get("estimate_coefficients:a").await.unwrap().as_deref(), Some("A"));
        assert_eq!(store.get("estimate_coefficients:b").await.unwrap().as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_missing_table_is_database_error() {
        let store = SqliteStore::new(":memory:").await.unwrap();

        let result = store.get("k").await;

        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let store = setup_test_store().await;

        let result = store.run_migrations().await;

        assert!(result.is_ok(), "second migration run failed: {:#?}", result.err());
    }
}
