//! # Cart State
//!
//! The cart container: an in-memory [`Cart`] persisted as a JSON blob on
//! every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! Screen Action           Container Call            Persisted?
//! ─────────────           ──────────────            ──────────
//! Tap "Add to cart" ────► add_item()         ────►  yes
//! Change quantity   ────► update_quantity()  ────►  yes
//! Tap remove        ────► remove_item()      ────►  yes
//! Tap clear         ────► clear()            ────►  yes
//! View cart         ────► with_cart() / totals()    (read only)
//! ```
//!
//! The mutex is held only for the synchronous mutation; the blob write
//! happens afterwards, so a lock is never held across an await.

use std::sync::Mutex;

use serde::Serialize;
use tracing::warn;

use crate::error::StateResult;
use crate::kv::KeyValueStore;
use lemon_core::{Cart, CartItem, Extra, MenuItem};

/// Namespaced key the cart blob is stored under.
pub const CART_KEY: &str = "lemon.cart";

/// Cart totals summary for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u32,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
        }
    }
}

/// The injected cart state container.
#[derive(Debug)]
pub struct CartState<S> {
    store: S,
    cart: Mutex<Cart>,
}

impl<S: KeyValueStore> CartState<S> {
    /// Creates an empty cart container over the given store.
    pub fn new(store: S) -> Self {
        CartState {
            store,
            cart: Mutex::new(Cart::new()),
        }
    }

    /// Loads the persisted cart, if any.
    ///
    /// A malformed blob is discarded with a warning rather than failing
    /// the launch; the user starts with an empty cart.
    pub async fn load(&self) -> StateResult<()> {
        if let Some(json) = self.store.get(CART_KEY).await? {
            match serde_json::from_str::<Cart>(&json) {
                Ok(cart) => *self.lock() = cart,
                Err(err) => warn!(error = %err, "Discarding malformed cart blob"),
            }
        }
        Ok(())
    }

    /// Adds a dish to the cart and persists.
    pub async fn add_item(
        &self,
        item: &MenuItem,
        extras: Vec<Extra>,
        quantity: u32,
    ) -> StateResult<CartItem> {
        let added = {
            let mut cart = self.lock();
            cart.add_item(item, extras, quantity)?
        };
        self.persist().await?;
        Ok(added)
    }

    /// Removes a cart line and persists.
    pub async fn remove_item(&self, cart_id: &str) -> StateResult<()> {
        self.lock().remove_item(cart_id)?;
        self.persist().await
    }

    /// Updates a line quantity (0 removes the line) and persists.
    pub async fn update_quantity(&self, cart_id: &str, quantity: u32) -> StateResult<()> {
        self.lock().update_quantity(cart_id, quantity)?;
        self.persist().await
    }

    /// Empties the cart and persists.
    pub async fn clear(&self) -> StateResult<()> {
        self.lock().clear();
        self.persist().await
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock())
    }

    /// Returns the current totals summary.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().expect("cart mutex poisoned")
    }

    async fn persist(&self) -> StateResult<()> {
        let json = {
            let cart = self.lock();
            serde_json::to_string(&*cart)?
        };
        self.store.set(CART_KEY, &json).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn menu_item(id: i64, price: f64) -> MenuItem {
        MenuItem {
            id,
            name: format!("Dish {}", id),
            description: String::new(),
            price,
            category: "Mains".to_string(),
            image: String::new(),
            rating: None,
            prepare_time: None,
            available: true,
            tags: None,
        }
    }

    #[tokio::test]
    async fn test_mutations_persist_across_containers() {
        let store = MemoryStore::new();

        let cart = CartState::new(store.clone());
        cart.add_item(&menu_item(1, 12.0), vec![], 2).await.unwrap();

        // A fresh container over the same store sees the cart.
        let reloaded = CartState::new(store);
        reloaded.load().await.unwrap();
        let totals = reloaded.totals();
        assert_eq!(totals.item_count, 1);
        assert!((totals.subtotal - 24.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_remove_and_clear_persist() {
        let store = MemoryStore::new();
        let cart = CartState::new(store.clone());

        let line = cart.add_item(&menu_item(1, 5.0), vec![], 1).await.unwrap();
        cart.add_item(&menu_item(2, 7.0), vec![], 1).await.unwrap();

        cart.remove_item(&line.cart_id).await.unwrap();
        assert_eq!(cart.totals().item_count, 1);

        cart.clear().await.unwrap();

        let reloaded = CartState::new(store);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.totals().item_count, 0);
    }

    #[tokio::test]
    async fn test_update_quantity_recomputes_totals() {
        let cart = CartState::new(MemoryStore::new());
        let line = cart.add_item(&menu_item(1, 10.0), vec![], 1).await.unwrap();

        cart.update_quantity(&line.cart_id, 3).await.unwrap();

        let totals = cart.totals();
        assert!((totals.subtotal - 30.0).abs() < 1e-9);
        assert!((totals.total - 33.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_rejected_mutation_changes_nothing() {
        let cart = CartState::new(MemoryStore::new());

        let err = cart.update_quantity("1_0", 2).await.unwrap_err();
        assert!(matches!(err, crate::error::StateError::Domain(_)));
        assert_eq!(cart.totals().item_count, 0);
    }

    #[tokio::test]
    async fn test_malformed_blob_resets_to_empty() {
        let store = MemoryStore::new();
        store.set(CART_KEY, "not json").await.unwrap();

        let cart = CartState::new(store);
        cart.load().await.unwrap();
        assert_eq!(cart.totals().item_count, 0);
    }
}
