//! # Order State
//!
//! The order-history container: append-only list of placed orders, newest
//! first, persisted as a JSON blob on every mutation. Orders only change
//! through status updates and read flags; the unread count feeds the
//! notification badge.

use std::sync::Mutex;

use tracing::warn;

use crate::error::StateResult;
use crate::kv::KeyValueStore;
use lemon_core::{Cart, DeliveryDetails, Order, OrderBook, OrderStatus};

/// Namespaced key the orders blob is stored under.
pub const ORDERS_KEY: &str = "lemon.orders";

/// The injected order state container.
#[derive(Debug)]
pub struct OrderState<S> {
    store: S,
    book: Mutex<OrderBook>,
}

impl<S: KeyValueStore> OrderState<S> {
    /// Creates an empty order container over the given store.
    pub fn new(store: S) -> Self {
        OrderState {
            store,
            book: Mutex::new(OrderBook::new()),
        }
    }

    /// Loads the persisted order history, if any.
    pub async fn load(&self) -> StateResult<()> {
        if let Some(json) = self.store.get(ORDERS_KEY).await? {
            match serde_json::from_str::<OrderBook>(&json) {
                Ok(book) => *self.lock() = book,
                Err(err) => warn!(error = %err, "Discarding malformed orders blob"),
            }
        }
        Ok(())
    }

    /// Places an order from the given cart and delivery details.
    ///
    /// Validation (non-blank address and phone, non-empty cart) happens in
    /// the domain type; a rejected order leaves the history untouched.
    pub async fn place_order(
        &self,
        cart: &Cart,
        delivery: DeliveryDetails,
    ) -> StateResult<Order> {
        let order = Order::from_cart(cart, delivery)?;
        self.lock().add(order.clone());
        self.persist().await?;
        Ok(order)
    }

    /// Marks one order as read and persists.
    pub async fn mark_read(&self, order_id: &str) -> StateResult<()> {
        self.lock().mark_read(order_id)?;
        self.persist().await
    }

    /// Marks every order as read and persists.
    pub async fn mark_all_read(&self) -> StateResult<()> {
        self.lock().mark_all_read();
        self.persist().await
    }

    /// Updates an order's status and persists.
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> StateResult<()> {
        self.lock().update_status(order_id, status)?;
        self.persist().await
    }

    /// Number of unread orders, for the notification badge.
    pub fn unread_count(&self) -> usize {
        self.lock().unread_count()
    }

    /// Executes a function with read access to the order history.
    pub fn with_orders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        f(&self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OrderBook> {
        self.book.lock().expect("order book mutex poisoned")
    }

    async fn persist(&self) -> StateResult<()> {
        let json = {
            let book = self.lock();
            serde_json::to_string(&*book)?
        };
        self.store.set(ORDERS_KEY, &json).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
