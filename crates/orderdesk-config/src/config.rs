//! Server and CLI configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment overrides. Credentials are never part of the file; they come
//! from `HONEY_API_ACCOUNT` / `HONEY_API_PASSWORD` only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use orderdesk_client::{TransportConfig, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};

/// Default config file name, searched for from the working directory upward.
pub const CONFIG_FILE_NAME: &str = "orderdesk.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ORDERDESK_CONFIG";
/// Environment override for the listen address.
pub const BIND_ENV: &str = "ORDERDESK_BIND";
/// Environment override for the remote endpoint.
pub const API_URL_ENV: &str = "ORDERDESK_API_URL";
/// Environment override for the log format.
pub const LOG_FORMAT_ENV: &str = "ORDERDESK_LOG_FORMAT";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line (for log aggregation).
    #[default]
    Json,
    /// Human-readable lines (for development).
    Human,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Human => "human",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "pretty" | "text" => Ok(Self::Human),
            _ => Err(ConfigError::InvalidValue {
                key: "log_format",
                value: s.to_string(),
            }),
        }
    }
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// SOAP endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Maximum concurrent lookups in a bulk stock check.
    #[serde(default = "default_bulk_concurrency")]
    pub bulk_concurrency: usize,

    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_bulk_concurrency() -> usize {
    1
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_format: LogFormat::default(),
            bulk_concurrency: default_bulk_concurrency(),
            api: ApiConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment and file system.
    ///
    /// `explicit` (e.g. a `--config` flag) wins over `ORDERDESK_CONFIG`, which
    /// wins over an `orderdesk.toml` found from the working directory upward.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().ok();
        Self::load_with(explicit, cwd.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load configuration with an injectable environment lookup.
    pub fn load_with(
        explicit: Option<&Path>,
        search_from: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()).map(PathBuf::from))
            .or_else(|| search_from.and_then(discover));

        let mut config = match path {
            Some(path) => {
                let config = Self::from_file(&path)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                config
            }
            None => Self::default(),
        };

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the transport cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api.timeout_secs",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Apply `ORDERDESK_*` environment overrides.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(bind) = env(BIND_ENV).filter(|v| !v.is_empty()) {
            self.bind = bind;
        }
        if let Some(url) = env(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api.endpoint = url;
        }
        if let Some(format) = env(LOG_FORMAT_ENV).filter(|v| !v.is_empty()) {
            self.log_format = format.parse()?;
        }
        Ok(())
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Transport settings for the API client.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.api.endpoint.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
            .with_accept_invalid_certs(self.api.accept_invalid_certs)
    }
}

/// Find `orderdesk.toml` in `start` or any parent directory.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
