//! Domain types for the orderdesk order-management bridge.
//!
//! This crate holds the transient values that flow through one
//! request/response cycle:
//!
//! - **Orders**: `OrderRequest`, `LineItem`, `Recipient`, `OrderReceipt`
//! - **Stock**: `StockLevel`, `BulkStockEntry`
//! - **Tracking**: `OrderStatusReport`
//! - **Shipping**: the fixed `ShippingMethod` catalog
//! - **Credentials**: remote account settings with a redacted `Debug`
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_core::prelude::*;
//!
//! let order: OrderRequest = serde_json::from_str(body)?;
//! order.validate()?;
//!
//! let method = shipping::find("F006").expect("catalog entry");
//! println!("{} via {}", order.reference, method.label);
//! ```

pub mod credentials;
pub mod error;
pub mod ids;
pub mod order;
pub mod shipping;
pub mod status;
pub mod stock;

pub use credentials::Credentials;
pub use error::CoreError;
pub use ids::*;
pub use order::{LineItem, OrderReceipt, OrderRequest, Recipient, ResponseCode};
pub use shipping::{Carrier, ShippingMethod};
pub use status::OrderStatusReport;
pub use stock::{BulkStatus, BulkStockEntry, StockLevel};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::credentials::Credentials;
    pub use crate::error::CoreError;
    pub use crate::ids::*;
    pub use crate::order::{LineItem, OrderReceipt, OrderRequest, Recipient, ResponseCode};
    pub use crate::shipping::{self, Carrier, ShippingMethod};
    pub use crate::status::OrderStatusReport;
    pub use crate::stock::{BulkStatus, BulkStockEntry, StockLevel};
}
