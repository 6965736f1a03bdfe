//! # lemon-core: Pure Business Logic for the Lemon Ordering App
//!
//! This crate is the **heart** of the Lemon backend. It contains all domain
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Mobile App Screens (external)                  │
//! │        Home list ──► Detail ──► Cart ──► Checkout               │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │        lemon-sync (engine + search)   lemon-state (containers)  │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                 ★ lemon-core (THIS CRATE) ★                     │
//! │                                                                 │
//! │   types      mapping        filter        currency              │
//! │   MenuItem   record→row     category      USD→MAD               │
//! │   Cart/Order defaults       AND-compose   formatting            │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                  lemon-db (SQLite cache store)                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Cart, Order, UserProfile)
//! - [`mapping`] - Remote record wire types and the defaulting map rule
//! - [`filter`] - Client-side category filtering
//! - [`currency`] - Price conversion and display formatting
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use filter::{filter_by_category, ALL_CATEGORIES, DISPLAY_CATEGORIES};
pub use mapping::{map_record, map_records, RemoteMenuDocument, RemoteMenuRecord};
pub use types::{
    Cart, CartItem, DeliveryDetails, Extra, MenuItem, Order, OrderBook, OrderStatus, UserProfile,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Flat tax rate applied to the cart subtotal.
pub const TAX_RATE: f64 = 0.10;

/// Display category for records that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Display name for records that arrive without one.
pub const DEFAULT_ITEM_NAME: &str = "Untitled";
