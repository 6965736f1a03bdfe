//! # lemon-sync: Menu Sync Engine for the Lemon Ordering App
//!
//! This crate decides where menu data comes from and keeps the local cache
//! populated, and owns the debounced search layer on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    lemon-sync (THIS CRATE)                      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────────┐  ┌────────────────────┐  │
//! │  │ SyncEngine  │  │ HttpMenuSource  │  │ SearchController   │  │
//! │  │ (engine.rs) │  │ (feed.rs)       │  │ (search.rs)        │  │
//! │  │             │  │                 │  │                    │  │
//! │  │ cache-first │◄─│ GET menu JSON   │  │ 500ms quiet window │  │
//! │  │ tier ladder │  │ 10s timeout     │  │ + category AND     │  │
//! │  │ + resync    │  │                 │  │                    │  │
//! │  └──────┬──────┘  └─────────────────┘  └─────────┬──────────┘  │
//! │         │                                        │             │
//! │  ┌──────┴──────┐                                 │             │
//! │  │ AppConfig   │   (config.rs: TOML + env)       │             │
//! │  └─────────────┘                                 │             │
//! └─────────┼────────────────────────────────────────┼─────────────┘
//!           ▼                                        ▼
//!                  lemon-db (shared cache handle)
//! ```
//!
//! DEPENDENCIES:
//! - lemon-core: record mapping, category filtering, domain types
//! - lemon-db: the SQLite cache the engine populates and search reads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lemon_sync::{AppConfig, HttpMenuSource, SearchController, SyncEngine};
//!
//! let config = AppConfig::load(None)?;
//! let source = HttpMenuSource::from_settings(&config.menu)?;
//! let engine = SyncEngine::new(source, db.clone());
//!
//! let load = engine.load_menu().await;          // app start
//! let report = engine.resync().await?;          // explicit user action
//!
//! let search = SearchController::new(&db);
//! let hits = search.on_input("pas", Some("Mains")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod search;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, CacheSettings, MenuSettings, SearchSettings};
pub use engine::{MenuLoad, MenuOrigin, ResyncReport, SyncEngine};
pub use error::{SyncError, SyncResult};
pub use feed::{HttpMenuSource, MenuSource, DEFAULT_MENU_ENDPOINT};
pub use search::{SearchController, DEFAULT_DEBOUNCE_MS};
