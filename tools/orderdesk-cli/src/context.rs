//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use orderdesk_client::ApiClient;
use orderdesk_config::ServerConfig;
use orderdesk_core::Credentials;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration.
    pub config: ServerConfig,
    /// Credentials read from the environment.
    pub credentials: Credentials,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from the config file and environment.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let config = ServerConfig::load(config_path.map(Path::new))
            .context("Failed to load configuration")?;

        Ok(Self {
            config,
            credentials: Credentials::from_env(),
            output,
            cwd,
        })
    }

    /// Build an API client, warning when credentials are incomplete.
    pub fn client(&self) -> Result<ApiClient> {
        self.output
            .debug(&format!("Endpoint: {}", self.config.api.endpoint));

        let client = ApiClient::connect(self.config.transport_config(), self.credentials.clone())
            .context("Failed to build API client")?;
        if !client.has_credentials() {
            self.output
                .warn("HONEY_API_ACCOUNT or HONEY_API_PASSWORD is not set; using empty credentials");
        }
        Ok(client)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
