//! # Key/Value Repository
//!
//! SQLite implementation of [`PersistentStore`] over the `key_value` table.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::kv::PersistentStore;

/// Repository for the `key_value` table.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.key_values();
/// repo.set("@RocketShoes:cart", "[]").await?;
/// let raw = repo.get("@RocketShoes:cart").await?;
/// ```
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }
}

#[async_trait]
impl PersistentStore for KeyValueRepository {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        debug!(key = %key, "Reading key");

        let value: Option<String> = sqlx::query_scalar("SELECT value FROM key_value WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing key");

        sqlx::query(
            r#"
            INSERT INTO key_value (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> KeyValueRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .key_values()
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let repo = repo().await;
        assert_eq!(repo.get("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let repo = repo().await;

        repo.set("@RocketShoes:cart", "[]").await.unwrap();
        repo.set("@RocketShoes:cart", r#"[{"id":1}]"#).await.unwrap();

        assert_eq!(
            repo.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_namespaces_do_not_collide() {
        let repo = repo().await;
        repo.set("@RocketShoes:cart", r#"[{"id":1}]"#).await.unwrap();
        repo.set("@Other:cart", "[]").await.unwrap();

        assert_eq!(
            repo.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(repo.get("@Other:cart").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(repo.get("@RocketShoes:theme").await.unwrap(), None);
    }
}
