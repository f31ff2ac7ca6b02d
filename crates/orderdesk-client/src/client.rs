//! HePws API client.

use std::time::Instant;

use async_trait::async_trait;
use orderdesk_core::{Credentials, OrderReceipt, OrderRequest, OrderStatusReport, StockLevel};
use orderdesk_soap::{decode, encode, envelope, SoapOperation};

use crate::backend::OrderBackend;
use crate::error::{ClientError, TransportError};
use crate::transport::{HttpTransport, SoapTransport, TransportConfig};

/// Client for the remote order/inventory service.
///
/// Each operation encodes a request fragment, wraps it in the SOAP envelope,
/// sends it through the transport and decodes the result.
pub struct ApiClient<T: SoapTransport = HttpTransport> {
    transport: T,
    credentials: Credentials,
}

impl ApiClient<HttpTransport> {
    /// Create a client backed by the HTTP transport.
    pub fn connect(
        config: TransportConfig,
        credentials: Credentials,
    ) -> Result<Self, TransportError> {
        Ok(Self::new(HttpTransport::new(config)?, credentials))
    }
}

impl<T: SoapTransport> ApiClient<T> {
    /// Create a client over any transport.
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Check that both credential values are configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_complete()
    }

    async fn call(&self, op: SoapOperation, fragment: &str) -> Result<String, ClientError> {
        let started = Instant::now();
        let body = envelope::request(op, fragment);
        let result = self.transport.call(op.soap_action(), body).await;

        match &result {
            Ok(text) => tracing::debug!(
                operation = %op,
                response_bytes = text.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "remote call completed"
            ),
            Err(e) => tracing::warn!(
                operation = %op,
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "remote call failed"
            ),
        }

        Ok(result?)
    }
}

#[async_trait]
impl<T: SoapTransport> OrderBackend for ApiClient<T> {
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ClientError> {
        order.validate()?;

        let fragment = encode::order(order, &self.credentials, &encode::ship_date_now());
        let response = self.call(SoapOperation::OrderSubmission, &fragment).await?;
        let receipt = decode::order_receipt(&response)?;

        tracing::info!(
            reference = %order.reference,
            items = order.items.len(),
            code = %receipt.code,
            "order submitted"
        );
        Ok(receipt)
    }

    async fn check_stock(&self, sku: &str) -> Result<StockLevel, ClientError> {
        let fragment = encode::stock_check(&self.credentials, sku);
        let response = self.call(SoapOperation::StockCheck, &fragment).await?;
        let level = decode::stock_level(&response)?;

        tracing::debug!(sku, qty = %level.qty, "stock checked");
        Ok(level)
    }

    async fn order_status(&self, reference: &str) -> Result<OrderStatusReport, ClientError> {
        let fragment = encode::order_status(&self.credentials, reference);
        let response = self.call(SoapOperation::OrderStatus, &fragment).await?;
        let report = decode::order_status(&response)?;

        tracing::debug!(reference, status = %report.status, "order status fetched");
        Ok(report)
    }
}
