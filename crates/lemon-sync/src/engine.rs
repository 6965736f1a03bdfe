//! # Sync Engine
//!
//! Decides where menu data comes from and keeps the local cache populated.
//!
//! ## Source Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        load_menu()                                  │
//! │                                                                     │
//! │  no cache handle? ────────────► fetch remote, map, serve            │
//! │       │                         (nothing persisted)                 │
//! │       ▼                                                             │
//! │  ensure menu table exists                                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  read all cached rows ──any──► serve them as-is                     │
//! │       │                        (no freshness check)                 │
//! │     empty                                                           │
//! │       ▼                                                             │
//! │  fetch remote ► map ► bulk upsert ► re-read cache ► serve           │
//! │                                                                     │
//! │  any error above ─────────────► best-effort direct remote fetch     │
//! │                                 └─ also fails? empty menu, no error │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step strictly happens-after the previous: table creation precedes
//! the row read, which precedes the conditional fetch-and-insert, which
//! precedes the final re-read.
//!
//! Cached rows win even when the remote has newer data - launching the app
//! never re-fetches over a warm cache. Whether that staleness is intended
//! is an open question upstream; the explicit, user-invoked [`resync`] is
//! the only refresh path either way.
//!
//! [`resync`]: SyncEngine::resync

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{SyncError, SyncResult};
use crate::feed::MenuSource;
use lemon_core::{map_records, MenuItem};
use lemon_db::Database;

// =============================================================================
// Load Result
// =============================================================================

/// Which tier ended up serving the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOrigin {
    /// Served from pre-existing cache rows.
    Cache,
    /// Cache was empty; fetched, persisted, then served from the cache.
    Synced,
    /// Served straight from the remote feed, nothing persisted.
    Remote,
    /// Every tier failed; the menu is empty.
    Unavailable,
}

impl std::fmt::Display for MenuOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuOrigin::Cache | MenuOrigin::Synced => write!(f, "SQLite DB"),
            MenuOrigin::Remote => write!(f, "Remote API"),
            MenuOrigin::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// The outcome of a menu load: items to display plus the serving tier.
#[derive(Debug, Clone, Serialize)]
pub struct MenuLoad {
    pub items: Vec<MenuItem>,
    pub origin: MenuOrigin,
}

/// The outcome of an explicit resync.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResyncReport {
    /// Cache row count after the reload.
    pub items_loaded: usize,
}

// =============================================================================
// Sync Engine
// =============================================================================

/// The menu sync engine.
///
/// Owns a [`MenuSource`] for the remote feed and, optionally, the cache
/// database handle. Without a handle every load is a direct remote fetch.
#[derive(Debug, Clone)]
pub struct SyncEngine<S> {
    source: S,
    db: Option<Database>,
}

impl<S: MenuSource> SyncEngine<S> {
    /// Creates an engine backed by the given cache database.
    pub fn new(source: S, db: Database) -> Self {
        SyncEngine {
            source,
            db: Some(db),
        }
    }

    /// Creates an engine with no local cache (direct remote fetches only).
    pub fn without_cache(source: S) -> Self {
        SyncEngine { source, db: None }
    }

    /// Returns the cache database handle, if one is attached.
    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    /// Loads the menu for display.
    ///
    /// This is the app-start entry point and the error boundary: failures
    /// at any tier degrade to the next one, and total failure yields an
    /// empty menu, never an error. See the module docs for the decision
    /// ladder.
    pub async fn load_menu(&self) -> MenuLoad {
        let Some(db) = &self.db else {
            debug!("No cache handle attached, loading menu from remote");
            return self.remote_only().await;
        };

        match self.load_via_cache(db).await {
            Ok(load) => load,
            Err(err) => {
                warn!(error = %err, "Cache path failed, falling back to remote");
                self.remote_only().await
            }
        }
    }

    /// The cache-first path: ensure table, read, fetch-and-populate if empty.
    async fn load_via_cache(&self, db: &Database) -> SyncResult<MenuLoad> {
        let menu = db.menu();

        menu.ensure_table().await?;

        let rows = menu.list_all().await?;
        if !rows.is_empty() {
            debug!(count = rows.len(), "Serving menu from warm cache");
            return Ok(MenuLoad {
                items: rows,
                origin: MenuOrigin::Cache,
            });
        }

        // Empty cache: fetch, populate, then serve what the cache now holds.
        let items = self.fetch_mapped().await?;
        menu.upsert_all(&items).await?;

        let rows = menu.list_all().await?;
        info!(count = rows.len(), "Populated menu cache from remote feed");

        Ok(MenuLoad {
            items: rows,
            origin: MenuOrigin::Synced,
        })
    }

    /// Best-effort direct fetch, mapped for display without persisting.
    async fn remote_only(&self) -> MenuLoad {
        match self.fetch_mapped().await {
            Ok(items) => MenuLoad {
                items,
                origin: MenuOrigin::Remote,
            },
            Err(err) => {
                error!(error = %err, "Remote fetch failed, serving empty menu");
                MenuLoad {
                    items: Vec::new(),
                    origin: MenuOrigin::Unavailable,
                }
            }
        }
    }

    /// Fetches the remote document and maps records into cache rows.
    async fn fetch_mapped(&self) -> SyncResult<Vec<MenuItem>> {
        let records = self.source.fetch_menu().await?;
        Ok(map_records(records))
    }

    /// Explicit, user-invoked resync.
    ///
    /// Drops and recreates the menu table (picking up any schema drift),
    /// then fetches and reloads unconditionally. Unlike [`load_menu`],
    /// failures here surface as a typed reason for the UI to report.
    ///
    /// [`load_menu`]: SyncEngine::load_menu
    pub async fn resync(&self) -> SyncResult<ResyncReport> {
        let db = self.db.as_ref().ok_or(SyncError::CacheUnavailable)?;
        let menu = db.menu();

        info!("Resyncing menu cache");
        menu.recreate().await?;

        let items = self.fetch_mapped().await?;
        menu.upsert_all(&items).await?;

        let items_loaded = menu.count().await? as usize;
        info!(count = items_loaded, "Resync complete");

        Ok(ResyncReport { items_loaded })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MenuSource;
    use lemon_db::DbConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test double returning a scripted JSON document and counting fetches.
    struct ScriptedSource {
        payload: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(payload: &'static str) -> Self {
            ScriptedSource {
                payload: Some(payload),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            ScriptedSource {
                payload: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MenuSource for &ScriptedSource {
        async fn fetch_menu(&self) -> SyncResult<Vec<lemon_core::RemoteMenuRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.payload {
                Some(json) => {
                    let doc: lemon_core::RemoteMenuDocument = serde_json::from_str(json)?;
                    Ok(doc.into_records())
                }
                None => Err(SyncError::Network("connection refused".to_string())),
            }
        }
    }

    const FEED: &str = r#"{
        "menu": [
            {"id": 1, "name": "Greek Salad", "price": 12.99, "category": "starters"},
            {"id": 2, "name": "Bruschetta", "price": 5.99, "category": "starters"},
            {"name": "Lemon Dessert", "price": "4.50", "category": "desserts"}
        ]
    }"#;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_cache_fetches_once_and_persists() {
        let source = ScriptedSource::new(FEED);
        let db = test_db().await;
        let engine = SyncEngine::new(&source, db.clone());

        let load = engine.load_menu().await;

        assert_eq!(load.origin, MenuOrigin::Synced);
        // Scan after an empty-cache sync returns exactly the mapped count.
        assert_eq!(load.items.len(), 3);
        assert_eq!(db.menu().count().await.unwrap(), 3);
        assert_eq!(source.call_count(), 1);

        // Mapping applied on the way in: positional id, capitalized
        // category, string price coerced.
        let dessert = db.menu().get_by_id(3).await.unwrap().unwrap();
        assert_eq!(dessert.name, "Lemon Dessert");
        assert_eq!(dessert.category, "Desserts");
        assert!((dessert.price - 4.50).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_warm_cache_never_refetches() {
        let source = ScriptedSource::new(FEED);
        let db = test_db().await;

        // Seed the cache with content that differs from the feed.
        let stale = lemon_core::MenuItem {
            id: 42,
            name: "Yesterday's Special".to_string(),
            description: String::new(),
            price: 8.0,
            category: "Mains".to_string(),
            image: String::new(),
            rating: None,
            prepare_time: None,
            available: true,
            tags: None,
        };
        db.menu().upsert_all(std::slice::from_ref(&stale)).await.unwrap();

        let engine = SyncEngine::new(&source, db);
        let load = engine.load_menu().await;

        // Stale cache wins: served as-is, zero fetches.
        assert_eq!(load.origin, MenuOrigin::Cache);
        assert_eq!(load.items.len(), 1);
        assert_eq!(load.items[0].name, "Yesterday's Special");
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_cache_handle_serves_remote_without_persisting() {
        let source = ScriptedSource::new(FEED);
        let engine = SyncEngine::without_cache(&source);

        let load = engine.load_menu().await;

        assert_eq!(load.origin, MenuOrigin::Remote);
        assert_eq!(load.items.len(), 3);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_total_failure_yields_empty_menu() {
        let source = ScriptedSource::failing();
        let db = test_db().await;
        let engine = SyncEngine::new(&source, db);

        let load = engine.load_menu().await;

        // The cache-path fetch failed, the fallback fetch failed; the
        // caller still gets an empty list, not an error.
        assert_eq!(load.origin, MenuOrigin::Unavailable);
        assert!(load.items.is_empty());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_remote() {
        let source = ScriptedSource::new(FEED);
        let db = test_db().await;
        db.close().await;

        let engine = SyncEngine::new(&source, db);
        let load = engine.load_menu().await;

        assert_eq!(load.origin, MenuOrigin::Remote);
        assert_eq!(load.items.len(), 3);
    }

    #[tokio::test]
    async fn test_resync_reloads_from_scratch() {
        let source = ScriptedSource::new(FEED);
        let db = test_db().await;

        // Seed a row the feed doesn't have; resync must not keep it.
        let stale = lemon_core::MenuItem {
            id: 99,
            name: "Retired Dish".to_string(),
            description: String::new(),
            price: 1.0,
            category: "Mains".to_string(),
            image: String::new(),
            rating: None,
            prepare_time: None,
            available: true,
            tags: None,
        };
        db.menu().upsert_all(std::slice::from_ref(&stale)).await.unwrap();

        let engine = SyncEngine::new(&source, db.clone());
        let report = engine.resync().await.unwrap();

        assert_eq!(report.items_loaded, 3);
        assert_eq!(db.menu().count().await.unwrap(), 3);
        assert!(db.menu().get_by_id(99).await.unwrap().is_none());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_resync_reports_fetch_failure() {
        let source = ScriptedSource::failing();
        let db = test_db().await;
        let engine = SyncEngine::new(&source, db);

        let err = engine.resync().await.unwrap_err();
        assert!(matches!(err, SyncError::Network(_)));
    }

    #[tokio::test]
    async fn test_resync_without_cache_is_rejected() {
        let source = ScriptedSource::new(FEED);
        let engine = SyncEngine::without_cache(&source);

        let err = engine.resync().await.unwrap_err();
        assert!(matches!(err, SyncError::CacheUnavailable));
    }

    #[tokio::test]
    async fn test_second_launch_serves_synced_rows_without_refetch() {
        let source = ScriptedSource::new(FEED);
        let db = test_db().await;
        let engine = SyncEngine::new(&source, db);

        let first = engine.load_menu().await;
        assert_eq!(first.origin, MenuOrigin::Synced);

        let second = engine.load_menu().await;
        assert_eq!(second.origin, MenuOrigin::Cache);
        assert_eq!(second.items.len(), 3);
        assert_eq!(source.call_count(), 1);
    }
}
