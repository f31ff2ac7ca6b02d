//! Stock check results.

use serde::{Deserialize, Serialize};

/// Stock level for one SKU as reported by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockLevel {
    /// SKU echoed by the remote service.
    pub sku: String,
    /// Quantity text exactly as returned.
    pub qty: String,
}

impl StockLevel {
    /// Create a new stock level.
    pub fn new(sku: impl Into<String>, qty: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            qty: qty.into(),
        }
    }

    /// Get available quantity.
    ///
    /// Leading digits are read the way a loose integer cast would; anything
    /// else, including a negative sign, yields 0. Oversized values saturate.
    pub fn quantity(&self) -> u64 {
        let digits: String = self
            .qty
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return 0;
        }
        // A digit run too long for u64 saturates.
        digits.parse().unwrap_or(u64::MAX)
    }

    /// Check if the item can be ordered.
    pub fn is_available(&self) -> bool {
        self.quantity() > 0
    }
}

/// Per-item outcome in a bulk stock check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkStatus {
    Success,
    Error,
}

/// One entry of a bulk stock check response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkStockEntry {
    /// SKU as requested.
    pub sku: String,
    /// Available quantity (0 on error).
    pub quantity: u64,
    /// Whether `quantity > 0`.
    pub is_available: bool,
    /// Whether the lookup succeeded.
    pub status: BulkStatus,
    /// Failure message for this SKU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkStockEntry {
    /// Entry for a successful lookup.
    pub fn found(sku: impl Into<String>, level: &StockLevel) -> Self {
        let quantity = level.quantity();
        Self {
            sku: sku.into(),
            quantity,
            is_available: quantity > 0,
            status: BulkStatus::Success,
            error: None,
        }
    }

    /// Entry for a failed lookup.
    pub fn failed(sku: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            quantity: 0,
            is_available: false,
            status: BulkStatus::Error,
            error: Some(error.into()),
        }
    }

    /// Check if this lookup succeeded.
    pub fn is_success(&self) -> bool {
        self.status == BulkStatus::Success
    }
}
