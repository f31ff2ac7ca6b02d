//! Configuration and logging setup for the orderdesk server and CLI.
//!
//! - `ServerConfig` - Defaults, optional `orderdesk.toml`, `ORDERDESK_*` overrides
//! - `telemetry` - tracing subscriber in json or human format

pub mod config;
pub mod telemetry;

pub use config::{ApiConfig, ConfigError, LogFormat, ServerConfig};
