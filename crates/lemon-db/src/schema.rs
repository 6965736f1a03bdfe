//! # Schema Bootstrap
//!
//! Table creation for the menu cache and the key-value store.
//!
//! There is deliberately no migration machinery: when the remote feed grows
//! a column, the resync path drops and recreates the menu table with the
//! current schema. `ensure_*` calls are idempotent and safe to repeat.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Current menu cache schema.
///
/// `available` defaults to 1 so rows written by older feed snapshots (which
/// had no availability flag) read back as orderable. `tags` holds a JSON
/// array serialized as text.
const CREATE_MENU_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS menu (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price       REAL NOT NULL DEFAULT 0,
    category    TEXT NOT NULL DEFAULT '',
    image       TEXT NOT NULL DEFAULT '',
    rating      REAL,
    prepareTime TEXT,
    available   INTEGER NOT NULL DEFAULT 1,
    tags        TEXT
)
"#;

/// Key-value table backing persisted app state (cart, orders, profile).
const CREATE_KV_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
"#;

/// Creates all tables that don't exist yet.
///
/// Idempotent; called on connect and again at the start of every sync
/// sequence (table creation strictly precedes the first cache read).
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    debug!("Ensuring cache schema");
    sqlx::query(CREATE_MENU_TABLE).execute(pool).await?;
    sqlx::query(CREATE_KV_TABLE).execute(pool).await?;
    Ok(())
}

/// Creates the menu table if missing.
pub async fn ensure_menu_table(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query(CREATE_MENU_TABLE).execute(pool).await?;
    Ok(())
}

/// Drops and recreates the menu table with the current schema.
///
/// This is the resync path's answer to schema drift: no in-place column
/// migration, just a full wipe-and-reload. Only ever invoked by an explicit
/// user action, never automatically.
pub async fn recreate_menu_table(pool: &SqlitePool) -> DbResult<()> {
    info!("Dropping and recreating menu table");
    sqlx::query("DROP TABLE IF EXISTS menu").execute(pool).await?;
    sqlx::query(CREATE_MENU_TABLE).execute(pool).await?;
    Ok(())
}
