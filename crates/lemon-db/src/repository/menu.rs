//! # Menu Repository
//!
//! Cache operations for the menu table.
//!
//! ## Key Operations
//! - Bulk upsert (INSERT OR REPLACE keyed by id - idempotent per item)
//! - Full scan in id order
//! - Substring search over name OR category
//! - Clear and drop-and-recreate (the resync path)
//!
//! ## Row Mapping
//! The `tags` column stores a JSON array as text, so the table row is its
//! own type here and converts to/from the domain [`MenuItem`]. A malformed
//! tags blob degrades to no tags rather than failing the whole scan.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::schema;
use lemon_core::MenuItem;

// =============================================================================
// Row Type
// =============================================================================

/// One row of the menu table, as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub rating: Option<f64>,
    #[sqlx(rename = "prepareTime")]
    pub prepare_time: Option<String>,
    pub available: bool,
    /// JSON array serialized as text, NULL when the item has no tags.
    pub tags: Option<String>,
}

impl From<MenuRow> for MenuItem {
    fn from(row: MenuRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            image: row.image,
            rating: row.rating,
            prepare_time: row.prepare_time,
            available: row.available,
            tags: row
                .tags
                .as_deref()
                .and_then(|t| serde_json::from_str(t).ok()),
        }
    }
}

fn tags_to_text(item: &MenuItem) -> Option<String> {
    item.tags.as_ref().and_then(|t| serde_json::to_string(t).ok())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for menu cache operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.menu();
/// repo.upsert_all(&items).await?;
/// let rows = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Creates the menu table if missing. Idempotent.
    pub async fn ensure_table(&self) -> DbResult<()> {
        schema::ensure_menu_table(&self.pool).await
    }

    /// Drops and recreates the menu table with the current schema.
    pub async fn recreate(&self) -> DbResult<()> {
        schema::recreate_menu_table(&self.pool).await
    }

    /// Bulk upserts items by id (INSERT OR REPLACE), in one transaction.
    ///
    /// Safe to call repeatedly with overlapping ids: replace semantics, so
    /// no uniqueness violation and no duplicate rows. A partial observer
    /// (a search racing the initial sync) only ever sees whole rows.
    pub async fn upsert_all(&self, items: &[MenuItem]) -> DbResult<()> {
        debug!(count = items.len(), "Upserting menu items");

        let mut tx = self.pool.begin().await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO menu
                    (id, name, description, price, category, image,
                     rating, prepareTime, available, tags)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(&item.category)
            .bind(&item.image)
            .bind(item.rating)
            .bind(&item.prepare_time)
            .bind(item.available)
            .bind(tags_to_text(item))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Returns every cached item in id order.
    pub async fn list_all(&self) -> DbResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuRow>(
            "SELECT id, name, description, price, category, image, \
             rating, prepareTime, available, tags \
             FROM menu ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Looks up one item by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuRow>(
            "SELECT id, name, description, price, category, image, \
             rating, prepareTime, available, tags \
             FROM menu WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MenuItem::from))
    }

    /// Substring search matching name OR category, in id order.
    ///
    /// Uses SQLite LIKE, which is case-insensitive for ASCII. There is no
    /// ranking: result order is cache order, same as [`list_all`].
    ///
    /// [`list_all`]: MenuRepository::list_all
    pub async fn search(&self, term: &str) -> DbResult<Vec<MenuItem>> {
        debug!(term = %term, "Searching menu cache");

        let pattern = format!("%{}%", term);
        let rows = sqlx::query_as::<_, MenuRow>(
            "SELECT id, name, description, price, category, image, \
             rating, prepareTime, available, tags \
             FROM menu \
             WHERE name LIKE ?1 OR category LIKE ?1 \
             ORDER BY id",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Deletes every row, keeping the table.
    pub async fn clear(&self) -> DbResult<()> {
        debug!("Clearing menu cache");
        sqlx::query("DELETE FROM menu").execute(&self.pool).await?;
        Ok(())
    }

    /// Counts cached items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn item(id: i64, name: &str, category: &str) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            price: 9.99,
            category: category.to_string(),
            image: String::new(),
            rating: None,
            prepare_time: None,
            available: true,
            tags: None,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_per_id() {
        let repo = test_db().await.menu();

        let mut dish = item(1, "Greek Salad", "Starters");
        repo.upsert_all(std::slice::from_ref(&dish)).await.unwrap();

        dish.price = 11.50;
        repo.upsert_all(std::slice::from_ref(&dish)).await.unwrap();

        // Exactly one row for the id, with the latest field values.
        assert_eq!(repo.count().await.unwrap(), 1);
        let stored = repo.get_by_id(1).await.unwrap().unwrap();
        assert!((stored.price - 11.50).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_upsert_overlapping_batches() {
        let repo = test_db().await.menu();

        repo.upsert_all(&[item(1, "Bruschetta", "Starters"), item(2, "Pasta", "Mains")])
            .await
            .unwrap();
        repo.upsert_all(&[item(2, "Pasta", "Mains"), item(3, "Baklava", "Desserts")])
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let repo = test_db().await.menu();

        repo.upsert_all(&[item(3, "C", "Mains"), item(1, "A", "Mains"), item(2, "B", "Mains")])
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_category() {
        let repo = test_db().await.menu();

        repo.upsert_all(&[
            item(1, "Greek Salad", "Starters"),
            item(2, "Lemon Dessert", "Desserts"),
            item(3, "Grilled Fish", "Mains"),
        ])
        .await
        .unwrap();

        // Name match, ASCII case-insensitive.
        let by_name = repo.search("greek").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Greek Salad");

        // Category match.
        let by_category = repo.search("dessert").await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Lemon Dessert");

        // No match.
        assert!(repo.search("sushi").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = test_db().await.menu();
        repo.upsert_all(&[item(7, "Hummus", "Starters")]).await.unwrap();

        assert_eq!(repo.get_by_id(7).await.unwrap().unwrap().name, "Hummus");
        assert!(repo.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_keeps_table() {
        let repo = test_db().await.menu();
        repo.upsert_all(&[item(1, "Pasta", "Mains")]).await.unwrap();

        repo.clear().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
        // Table still usable.
        repo.upsert_all(&[item(1, "Pasta", "Mains")]).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_recreate_wipes_rows() {
        let repo = test_db().await.menu();
        repo.upsert_all(&[item(1, "Pasta", "Mains")]).await.unwrap();

        repo.recreate().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.upsert_all(&[item(1, "Pasta", "Mains")]).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_tags_round_trip_as_json_text() {
        let repo = test_db().await.menu();

        let mut dish = item(1, "Harira", "Starters");
        dish.tags = Some(vec!["soup".to_string(), "traditional".to_string()]);
        dish.rating = Some(4.7);
        dish.prepare_time = Some("15 min".to_string());
        dish.available = false;
        repo.upsert_all(std::slice::from_ref(&dish)).await.unwrap();

        let stored = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(
            stored.tags.as_deref(),
            Some(&["soup".to_string(), "traditional".to_string()][..])
        );
        assert_eq!(stored.rating, Some(4.7));
        assert_eq!(stored.prepare_time.as_deref(), Some("15 min"));
        assert!(!stored.available);
    }
}
