//! # Domain Types
//!
//! Core domain types used throughout the Lemon ordering app.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    MenuItem     │   │    CartItem     │   │     Order       │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  id (stable)    │──►│  cart_id        │──►│  id (generated) │
//! │  name, price    │   │  item snapshot  │   │  cart snapshot  │
//! │  category       │   │  extras, qty    │   │  delivery info  │
//! └─────────────────┘   └─────────────────┘   └─────────────────┘
//! ```
//!
//! A `MenuItem` is a cache row mirroring the remote menu. A `CartItem`
//! snapshots one menu item plus selected extras; repeated adds of the same
//! item produce distinct lines keyed by `"{id}_{millis}"`. An `Order` is an
//! append-only snapshot of the cart at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, TAX_RATE};

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the menu, as cached locally.
///
/// Rows are created on first successful sync and replaced wholesale on
/// resync; the UI never deletes individual rows. `id` is stable across
/// syncs (insert-or-replace is keyed by it).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable identifier; primary key of the cache row.
    pub id: i64,

    /// Display name shown in lists and on the detail screen.
    pub name: String,

    /// Longer description shown on the detail screen.
    pub description: String,

    /// Price in the menu currency (USD).
    pub price: f64,

    /// Display category, first-letter capitalized ("Mains", "Desserts").
    pub category: String,

    /// Image URL or local asset reference.
    pub image: String,

    /// Average rating, when the feed provides one.
    pub rating: Option<f64>,

    /// Preparation time as free text ("20 min"), when provided.
    pub prepare_time: Option<String>,

    /// Whether the dish can currently be ordered.
    pub available: bool,

    /// Free-form tags ("spicy", "vegan"), when provided.
    pub tags: Option<Vec<String>>,
}

// =============================================================================
// Cart
// =============================================================================

/// An extra option selected for a cart line (e.g. "Extra cheese").
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Extra {
    pub name: String,
    pub price: f64,
}

/// One line in the shopping cart.
///
/// ## Design Notes
/// - `menu_item_id` references the cache row for lookups
/// - name/price/image are frozen at the moment of adding, so the cart stays
///   consistent even if a resync replaces the menu underneath it
/// - `cart_id` is synthetic: `"{menu_item_id}_{added_at_millis}"`, so adding
///   the same dish twice with different extras yields two distinct lines
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Synthetic unique key distinguishing repeated adds of the same dish.
    pub cart_id: String,

    /// Menu item this line was created from.
    pub menu_item_id: i64,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub price: f64,

    /// Image reference at time of adding (frozen).
    pub image: String,

    /// Selected extras, each priced per unit.
    pub extras: Vec<Extra>,

    /// Quantity of this line.
    pub quantity: u32,

    /// Line total: (price + sum of extras) x quantity.
    pub total_price: f64,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a menu item, selected extras and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the dish price changes after
    /// a resync, this line keeps the original price.
    pub fn from_menu_item(item: &MenuItem, extras: Vec<Extra>, quantity: u32) -> Self {
        let added_at = Utc::now();
        let mut line = CartItem {
            cart_id: format!("{}_{}", item.id, added_at.timestamp_millis()),
            menu_item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            extras,
            quantity,
            total_price: 0.0,
            added_at,
        };
        line.total_price = line.line_total();
        line
    }

    /// Unit price including selected extras.
    pub fn unit_price_with_extras(&self) -> f64 {
        self.price + self.extras.iter().map(|e| e.price).sum::<f64>()
    }

    /// Line total: unit price with extras, times quantity.
    pub fn line_total(&self) -> f64 {
        self.unit_price_with_extras() * self.quantity as f64
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `cart_id`; the same dish may appear on several lines
/// - Quantity is always > 0 (updating to 0 removes the line)
/// - At most [`MAX_CART_ITEMS`] lines, [`MAX_ITEM_QUANTITY`] per line
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a dish to the cart as a new line.
    ///
    /// ## Behavior
    /// Unlike a quantity-merging cart, every add creates its own line: the
    /// same dish with different extras must stay distinguishable.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        extras: Vec<Extra>,
        quantity: u32,
    ) -> CoreResult<CartItem> {
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let line = CartItem::from_menu_item(item, extras, quantity);
        self.items.push(line.clone());
        Ok(line)
    }

    /// Updates the quantity of a cart line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Line not found returns an error
    pub fn update_quantity(&mut self, cart_id: &str, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(cart_id);
        }
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.cart_id == cart_id) {
            Some(line) => {
                line.quantity = quantity;
                line.total_price = line.line_total();
                Ok(())
            }
            None => Err(CoreError::CartItemNotFound(cart_id.to_string())),
        }
    }

    /// Removes a line from the cart by its synthetic key.
    pub fn remove_item(&mut self, cart_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.cart_id != cart_id);

        if self.items.len() == initial_len {
            Err(CoreError::CartItemNotFound(cart_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal before tax.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> f64 {
        self.subtotal() * TAX_RATE
    }

    /// Grand total (subtotal + tax).
    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Orders
// =============================================================================

/// The lifecycle status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order accepted, not yet in the kitchen.
    #[default]
    Placed,
    /// Kitchen is working on it.
    Preparing,
    /// Handed to the courier.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

/// Delivery details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub delivery_address: String,
    pub phone_number: String,
    pub special_instructions: Option<String>,
}

/// A placed order: a snapshot of cart contents plus delivery metadata.
///
/// Append-only once placed; only `status` and `read` change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Generated identifier, `order_<uuid>`.
    pub id: String,

    /// Cart lines frozen at checkout.
    pub items: Vec<CartItem>,

    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,

    pub delivery_address: String,
    pub phone_number: String,
    pub special_instructions: Option<String>,

    /// When the order was placed.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    pub status: OrderStatus,

    /// Read flag for the notification badge.
    pub read: bool,
}

impl Order {
    /// Creates an order from the current cart and delivery details.
    ///
    /// ## Validation
    /// - Delivery address and phone number must be non-blank
    /// - Cart must contain at least one line
    pub fn from_cart(cart: &Cart, delivery: DeliveryDetails) -> CoreResult<Self> {
        if delivery.delivery_address.trim().is_empty() {
            return Err(CoreError::missing("deliveryAddress"));
        }
        if delivery.phone_number.trim().is_empty() {
            return Err(CoreError::missing("phoneNumber"));
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(Order {
            id: generate_order_id(),
            items: cart.items.clone(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
            delivery_address: delivery.delivery_address,
            phone_number: delivery.phone_number,
            special_instructions: delivery.special_instructions,
            placed_at: Utc::now(),
            status: OrderStatus::Placed,
            read: false,
        })
    }
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    format!("order_{}", Uuid::new_v4())
}

/// The order history: newest first, append-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    /// Placed orders, newest first.
    pub orders: Vec<Order>,
}

impl OrderBook {
    /// Creates an empty order history.
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Prepends a newly placed order.
    pub fn add(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Marks one order as read.
    pub fn mark_read(&mut self, order_id: &str) -> CoreResult<()> {
        match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.read = true;
                Ok(())
            }
            None => Err(CoreError::OrderNotFound(order_id.to_string())),
        }
    }

    /// Marks every order as read.
    pub fn mark_all_read(&mut self) {
        for order in &mut self.orders {
            order.read = true;
        }
    }

    /// Updates the status of one order.
    pub fn update_status(&mut self, order_id: &str, status: OrderStatus) -> CoreResult<()> {
        match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                Ok(())
            }
            None => Err(CoreError::OrderNotFound(order_id.to_string())),
        }
    }

    /// Number of unread orders, for the notification badge.
    pub fn unread_count(&self) -> usize {
        self.orders.iter().filter(|o| !o.read).count()
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The persisted user profile blob, including the onboarding flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Set once onboarding completes; gates the welcome flow.
    #[serde(default)]
    pub is_onboarded: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
