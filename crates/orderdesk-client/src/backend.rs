//! The operation set behind the HTTP front end.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use orderdesk_core::{
    shipping, BulkStockEntry, OrderReceipt, OrderRequest, OrderStatusReport, ShippingMethod,
    StockLevel,
};

use crate::error::ClientError;

/// Operations the dispatcher can invoke.
///
/// `ApiClient` is the production implementation; tests substitute stubs.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Submit an order and return the service's receipt.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ClientError>;

    /// Check stock for one SKU.
    async fn check_stock(&self, sku: &str) -> Result<StockLevel, ClientError>;

    /// Look up the status of a submitted order.
    async fn order_status(&self, reference: &str) -> Result<OrderStatusReport, ClientError>;

    /// List shipping methods. Never touches the network.
    fn shipping_methods(&self) -> &'static [ShippingMethod] {
        shipping::catalog()
    }
}

/// Check stock for many SKUs.
///
/// One entry per input SKU, in input order. A failed lookup becomes an error
/// entry for that SKU only. At most `concurrency` lookups run at once; `0`
/// and `1` both mean one at a time.
pub async fn bulk_check_stock<B>(
    backend: &B,
    skus: &[String],
    concurrency: usize,
) -> Vec<BulkStockEntry>
where
    B: OrderBackend + ?Sized,
{
    let lookups: Vec<_> = skus
        .iter()
        .map(|sku| async move {
            match backend.check_stock(sku).await {
                Ok(level) => BulkStockEntry::found(sku.as_str(), &level),
                Err(e) => {
                    tracing::warn!(sku = %sku, error = %e, "stock check failed");
                    BulkStockEntry::failed(sku.as_str(), e.to_string())
                }
            }
        })
        .collect();

    stream::iter(lookups)
        .buffered(concurrency.max(1))
        .collect()
        .await
}
