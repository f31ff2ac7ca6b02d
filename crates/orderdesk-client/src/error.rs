//! Client error types.

use std::time::Duration;

use orderdesk_core::CoreError;
use orderdesk_soap::CodecError;

/// Error type for a single SOAP round trip.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Non-200 status. `url` is kept for logs and left out of the message.
    #[error("HTTP Error: {status}")]
    Http { status: u16, url: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Error type for API client operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Network failure or non-200 status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Input rejected before any remote call.
    #[error(transparent)]
    Validation(#[from] CoreError),
}

impl ClientError {
    /// Check if the failure happened before contacting the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
