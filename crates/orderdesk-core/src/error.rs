//! Domain validation errors.

use thiserror::Error;

/// Errors raised while validating inbound domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Order reference is empty.
    #[error("Order reference is required")]
    MissingReference,

    /// Order has no line items.
    #[error("Order must contain at least one item")]
    NoLineItems,

    /// A line item has an empty SKU.
    #[error("Item {index} has an empty SKU")]
    EmptySku { index: usize },

    /// A line item quantity is zero or negative.
    #[error("Invalid quantity {quantity} for SKU {sku}")]
    InvalidQuantity { sku: String, quantity: i64 },

    /// Shipping method code is not in the catalog.
    #[error("Unknown shipping method: {0}")]
    UnknownShippingMethod(String),
}
