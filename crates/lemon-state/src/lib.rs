//! # lemon-state: State Containers for the Lemon Ordering App
//!
//! Explicit state containers for the cart, the order history and the user
//! profile, injected via dependency passing. Each container exposes
//! {load, mutate, persist}: mutations go through the domain types in
//! `lemon-core`, then the whole state is written as a JSON blob through
//! the [`KeyValueStore`] port.
//!
//! ## Keys
//! ```text
//! lemon.cart       the cart blob
//! lemon.orders     the order history blob
//! lemon.profile    the user profile blob
//! lemon.onboarded  the onboarding flag
//! ```
//!
//! ## Port Implementations
//! - [`SqliteStore`] - the kv table in the cache database
//! - [`MemoryStore`] - in-memory map for tests and cache-less operation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lemon_state::{CartState, SqliteStore};
//!
//! let store = SqliteStore::new(&db);
//! let cart = CartState::new(store);
//! cart.load().await?;
//! cart.add_item(&dish, vec![], 1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod kv;
pub mod orders;
pub mod profile;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{CartState, CartTotals, CART_KEY};
pub use error::{StateError, StateResult};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryStore, SqliteStore};
pub use orders::{OrderState, ORDERS_KEY};
pub use profile::{ProfileState, ONBOARDING_KEY, PROFILE_KEY};
