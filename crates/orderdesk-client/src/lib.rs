//! Client for the HePws order/inventory SOAP service.
//!
//! This crate provides:
//! - `SoapTransport` / `HttpTransport` - One POST per call, fixed headers and timeout
//! - `TransportConfig` - Endpoint, timeout and TLS settings
//! - `ApiClient` - Encode, send and decode for each remote operation
//! - `OrderBackend` - The operation set the HTTP front end dispatches to
//! - `bulk_check_stock` - Order-preserving, failure-isolated multi-SKU check

mod backend;
mod client;
mod error;
mod transport;

pub use backend::*;
pub use client::*;
pub use error::*;
pub use transport::*;
