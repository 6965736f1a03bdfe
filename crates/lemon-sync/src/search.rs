//! # Debounced Search
//!
//! Incremental text search over the menu cache, combined with client-side
//! category filtering.
//!
//! ## Debounce Semantics
//! ```text
//! keystroke "p"   ──┐
//! keystroke "pa"  ──┼── each call starts a quiet-window timer and bumps
//! keystroke "pas" ──┘   the generation counter; an older timer that wakes
//!                       up to find a newer generation does nothing
//!
//! ...500ms of quiet...
//!
//! one cache query, for "pas"
//! ```
//!
//! The generation counter is the only cancellation point in the app: a new
//! keystroke invalidates every pending dispatch, so only the final
//! debounced value ever reaches the cache.
//!
//! An empty (or whitespace-only) query resets the visible set to the full
//! cache contents instead of substring-matching. The category filter is
//! applied afterwards as a logical AND; result order is cache order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::SyncResult;
use lemon_core::{filter_by_category, MenuItem};
use lemon_db::{Database, MenuRepository};

/// Default quiet window after the last keystroke, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Debounced search over the menu cache.
///
/// Clone is cheap; clones share the generation counter, so concurrent
/// keystrokes delivered through different clones still supersede each
/// other.
#[derive(Debug, Clone)]
pub struct SearchController {
    menu: MenuRepository,
    debounce: Duration,
    generation: Arc<AtomicU64>,
}

impl SearchController {
    /// Creates a controller with the default quiet window.
    pub fn new(db: &Database) -> Self {
        Self::with_debounce(db, Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Creates a controller with a custom quiet window.
    pub fn with_debounce(db: &Database, debounce: Duration) -> Self {
        SearchController {
            menu: db.menu(),
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handles one keystroke of the search box.
    ///
    /// Waits out the quiet window, then queries the cache - unless a newer
    /// keystroke arrived meanwhile, in which case this dispatch is
    /// superseded and resolves to `None` without touching the cache.
    pub async fn on_input(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> SyncResult<Option<Vec<MenuItem>>> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        sleep(self.debounce).await;

        if self.generation.load(Ordering::SeqCst) != token {
            debug!(query = %query, "Search dispatch superseded by newer keystroke");
            return Ok(None);
        }

        Ok(Some(self.execute(query, category).await?))
    }

    /// Runs the search immediately, without debouncing.
    ///
    /// Empty or whitespace-only queries reset to the full cache contents;
    /// the category filter then composes as a logical AND. Order follows
    /// the cache (id order), no ranking.
    pub async fn execute(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> SyncResult<Vec<MenuItem>> {
        let query = query.trim();

        let items = if query.is_empty() {
            self.menu.list_all().await?
        } else {
            self.menu.search(query).await?
        };

        Ok(filter_by_category(items, category))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
