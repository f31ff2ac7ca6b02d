//! SOAP transport over HTTP.

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::error::TransportError;

/// Production endpoint of the HePws service.
pub const DEFAULT_ENDPOINT: &str = "https://www.honeysplace.com/ws/HePws.asmx";

/// Per-call timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type of every SOAP request.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Service URL every call is posted to.
    pub endpoint: String,
    /// Total time allowed for one call.
    pub timeout: Duration,
    /// Skip TLS certificate verification.
    ///
    /// Off by default. Only for endpoints with broken certificates.
    pub accept_invalid_certs: bool,
}

impl TransportConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable TLS certificate verification bypass.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

/// One synchronous SOAP call: POST the envelope, return the response text.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Send an envelope with the given `SOAPAction` header.
    async fn call(&self, soap_action: &str, envelope: String) -> Result<String, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        if config.accept_invalid_certs {
            tracing::warn!(
                endpoint = %config.endpoint,
                "TLS certificate verification is disabled for the SOAP endpoint"
            );
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Request(error_chain(&e)))?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    async fn call(&self, soap_action: &str, envelope: String) -> Result<String, TransportError> {
        let started = Instant::now();
        let url = &self.config.endpoint;

        // Content-Length is derived from the body by reqwest.
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!(
            soap_action,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "SOAP call returned"
        );

        if status != StatusCode::OK {
            tracing::warn!(url = %url, status = status.as_u16(), soap_action, "SOAP call rejected");
            return Err(TransportError::Http {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        response.text().await.map_err(|e| self.classify(e))
    }
}

impl HttpTransport {
    fn classify(&self, error: reqwest::Error) -> TransportError {
        tracing::debug!(url = %self.config.endpoint, error = %error, "SOAP call failed");
        let error = error.without_url();
        if error.is_timeout() {
            TransportError::Timeout(self.config.timeout)
        } else if error.is_connect() {
            TransportError::Connection(error_chain(&error))
        } else {
            TransportError::Request(error_chain(&error))
        }
    }
}

/// Render an error with its full source chain.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
