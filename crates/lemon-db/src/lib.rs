//! # lemon-db: Cache Store for the Lemon Ordering App
//!
//! This crate provides local storage for the Lemon backend: the SQLite
//! menu cache mirroring the remote feed, and the key-value table backing
//! persisted app state.
//!
//! ## Architecture Position
//! ```text
//! lemon-sync (engine + search)      lemon-state (containers)
//!        │                                 │
//!        ▼                                 ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  lemon-db (THIS CRATE)                   │
//! │                                                          │
//! │   ┌────────────┐   ┌──────────────────┐   ┌──────────┐  │
//! │   │  Database  │   │   Repositories   │   │  Schema  │  │
//! │   │ (pool.rs)  │◄──│ menu.rs / kv.rs  │   │bootstrap │  │
//! │   └────────────┘   └──────────────────┘   └──────────┘  │
//! └──────────────────────────────┬───────────────────────────┘
//!                                ▼
//!                       SQLite database file
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Table bootstrap and drop-and-recreate
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, kv)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lemon_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/lemon.db")).await?;
//! let rows = db.menu().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::kv::KvRepository;
pub use repository::menu::MenuRepository;
