//! # Error Types
//!
//! Domain-specific error types for lemon-core.
//!
//! ## Error Hierarchy
//! ```text
//! lemon-core errors (this file)
//! └── CoreError        - Cart/order rule violations and malformed records
//!
//! lemon-db errors (separate crate)
//! └── DbError          - Cache store failures
//!
//! lemon-sync errors (separate crate)
//! └── SyncError        - Network / parse / cache tier failures
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (cart id, field name, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Core business logic errors.
///
/// These represent business rule violations. They should be caught and
/// translated to user-friendly messages by the embedding application.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Cart line not found for the given synthetic key.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// A required checkout field is missing or blank.
    ///
    /// ## When This Occurs
    /// - Delivery address left empty
    /// - Phone number left empty
    #[error("{field} is required")]
    MissingField { field: String },

    /// Attempted to place an order from an empty cart.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
}

impl CoreError {
    /// Creates a MissingField error for a given field name.
    pub fn missing(field: impl Into<String>) -> Self {
        CoreError::MissingField {
            field: field.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
