//! HTTP front end for the HePws order/inventory service.
//!
//! Browser requests arrive as `POST /?action=<name>` with a JSON body. The
//! dispatcher resolves the action, calls the [`OrderBackend`], and answers
//! with JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orderdesk_server::{router, AppState, ServerConfig};
//!
//! let config = ServerConfig::load(None)?;
//! let client = ApiClient::connect(config.transport_config(), Credentials::from_env())?;
//! let app = router(AppState::new(Arc::new(client), config.bulk_concurrency));
//! axum::serve(listener, app).await?;
//! ```
//!
//! [`OrderBackend`]: orderdesk_client::OrderBackend

pub mod dispatch;
pub mod router;

pub use orderdesk_config::{telemetry, ApiConfig, ConfigError, LogFormat, ServerConfig};
pub use dispatch::{dispatch, Action, DispatchError};
pub use router::{router, AppState, REQUEST_ID_HEADER};
