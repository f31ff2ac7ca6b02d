//! Action dispatch.
//!
//! Maps `(action, body)` to a backend call and a JSON result. The action is
//! resolved before the body is inspected, so an unknown action fails the
//! same way whatever the body holds.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use orderdesk_client::{bulk_check_stock, ClientError, OrderBackend};
use orderdesk_core::OrderRequest;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Actions accepted on `?action=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SubmitOrder,
    CheckStock,
    BulkStockCheck,
    TrackOrder,
    ShippingMethods,
}

impl Action {
    /// Every action, in documentation order.
    pub const ALL: [Action; 5] = [
        Action::SubmitOrder,
        Action::CheckStock,
        Action::BulkStockCheck,
        Action::TrackOrder,
        Action::ShippingMethods,
    ];

    /// Query-string name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitOrder => "submit-order",
            Self::CheckStock => "check-stock",
            Self::BulkStockCheck => "bulk-stock-check",
            Self::TrackOrder => "track-order",
            Self::ShippingMethods => "shipping-methods",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or(DispatchError::InvalidAction)
    }
}

/// Dispatch failures, each mapped to one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid action")]
    InvalidAction,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to encode response: {0}")]
    Encode(String),
}

impl DispatchError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAction | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Client(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Self::Client(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    pub fn to_json(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

#[derive(Debug, Deserialize)]
struct StockQuery {
    sku: String,
}

#[derive(Debug, Deserialize)]
struct BulkStockQuery {
    skus: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TrackQuery {
    reference: String,
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, DispatchError> {
    serde_json::from_slice(body).map_err(|e| DispatchError::InvalidBody(e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(|e| DispatchError::Encode(e.to_string()))
}

/// Run one action against a backend.
///
/// `bulk_concurrency` bounds concurrent lookups for `bulk-stock-check`.
pub async fn dispatch<B>(
    action: Action,
    body: &[u8],
    backend: &B,
    bulk_concurrency: usize,
) -> Result<Value, DispatchError>
where
    B: OrderBackend + ?Sized,
{
    match action {
        Action::SubmitOrder => {
            let order: OrderRequest = parse_body(body)?;
            order.validate().map_err(ClientError::from)?;
            let receipt = backend.submit_order(&order).await?;
            to_value(&receipt)
        }
        Action::CheckStock => {
            let query: StockQuery = parse_body(body)?;
            let level = backend.check_stock(&query.sku).await?;
            to_value(&level)
        }
        Action::BulkStockCheck => {
            let query: BulkStockQuery = parse_body(body)?;
            let entries = bulk_check_stock(backend, &query.skus, bulk_concurrency).await;
            tracing::debug!(
                requested = query.skus.len(),
                failed = entries.iter().filter(|e| !e.is_success()).count(),
                "bulk stock check finished"
            );
            to_value(&entries)
        }
        Action::TrackOrder => {
            let query: TrackQuery = parse_body(body)?;
            let report = backend.order_status(&query.reference).await?;
            to_value(&report)
        }
        Action::ShippingMethods => to_value(&backend.shipping_methods()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use orderdesk_client::TransportError;
    use orderdesk_core::{CoreError, OrderReceipt, OrderStatusReport, StockLevel};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrderBackend for CountingBackend {
        async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OrderReceipt::new("200", order.reference.as_str()))
        }

        async fn check_stock(&self, sku: &str) -> Result<StockLevel, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if sku == "DOWN" {
                return Err(TransportError::Connection("refused".into()).into());
            }
            Ok(StockLevel::new(sku, "3"))
        }

        async fn order_status(&self, reference: &str) -> Result<OrderStatusReport, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if reference == "BAD" {
                return Err(CoreError::MissingReference.into());
            }
            Ok(OrderStatusReport {
                reference: reference.to_string(),
                status: "Open".to_string(),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action() {
        let err = "frobnicate".parse::<Action>().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json(), json!({ "error": "Invalid action" }));
        assert!("Check-Stock".parse::<Action>().is_err());
    }

    #[tokio::test]
    async fn test_check_stock() {
        let backend = CountingBackend::default();
        let value = dispatch(Action::CheckStock, br#"{"sku":"ABC"}"#, &backend, 1)
            .await
            .unwrap();
        assert_eq!(value, json!({ "sku": "ABC", "qty": "3" }));
    }

    #[tokio::test]
    async fn test_invalid_body_skips_backend() {
        let backend = CountingBackend::default();
        let err = dispatch(Action::CheckStock, b"not json", &backend, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::InvalidBody(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_order_skips_backend() {
        let backend = CountingBackend::default();
        let body = br#"{
            "reference": "ORD-9", "shippingMethod": "F006", "items": [],
            "firstName": "Jane", "lastName": "Smith", "address1": "1 Main St",
            "city": "Austin", "state": "TX", "zip": "78701", "country": "US",
            "phone": "555-0100", "email": "jane@example.com"
        }"#;

        let err = dispatch(Action::SubmitOrder, body, &backend, 1)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Order must contain at least one item");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_500() {
        let backend = CountingBackend::default();
        let err = dispatch(Action::CheckStock, br#"{"sku":"DOWN"}"#, &backend, 1)
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_json(), json!({ "error": "Connection error: refused" }));
    }

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let backend = CountingBackend::default();
        let err = dispatch(Action::TrackOrder, br#"{"reference":"BAD"}"#, &backend, 1)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bulk_isolates_failure() {
        let backend = CountingBackend::default();
        let value = dispatch(
            Action::BulkStockCheck,
            br#"{"skus":["A","DOWN","B"]}"#,
            &backend,
            2,
        )
        .await
        .unwrap();

        assert_eq!(
            value,
            json!([
                { "sku": "A", "quantity": 3, "isAvailable": true, "status": "success" },
                { "sku": "DOWN", "quantity": 0, "isAvailable": false, "status": "error",
                  "error": "Connection error: refused" },
                { "sku": "B", "quantity": 3, "isAvailable": true, "status": "success" },
            ])
        );
    }

    #[tokio::test]
    async fn test_shipping_methods_ignores_body() {
        let backend = CountingBackend::default();
        let value = dispatch(Action::ShippingMethods, b"garbage", &backend, 1)
            .await
            .unwrap();

        let methods = value.as_array().unwrap();
        assert_eq!(methods.len(), 19);
        assert_eq!(
            methods[0],
            json!({ "value": "F001", "label": "FedEx First Overnight", "group": "FedEx" })
        );
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
