//! # Key-Value Repository
//!
//! Namespaced string blobs for persisted app state.
//!
//! The mobile app persists cart contents, the orders list and the user
//! profile as JSON blobs under distinct keys. The state containers only
//! need a get/set/remove-by-key contract with string values; this table
//! is the local backing for it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for key-value blob storage.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads the value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Writing kv blob");

        sqlx::query("INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Removes the value stored under `key`. Removing a missing key is a no-op.
    pub async fn remove(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_kv_round_trip() {
        let kv = Database::new(DbConfig::in_memory()).await.unwrap().kv();

        assert!(kv.get("lemon.cart").await.unwrap().is_none());

        kv.set("lemon.cart", r#"{"items":[]}"#).await.unwrap();
        assert_eq!(
            kv.get("lemon.cart").await.unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );

        // Replace semantics.
        kv.set("lemon.cart", r#"{"items":[1]}"#).await.unwrap();
        assert_eq!(
            kv.get("lemon.cart").await.unwrap().as_deref(),
            Some(r#"{"items":[1]}"#)
        );

        kv.remove("lemon.cart").await.unwrap();
        assert!(kv.get("lemon.cart").await.unwrap().is_none());

        // Removing a missing key is fine.
        kv.remove("lemon.cart").await.unwrap();
    }
}
