//! Configuration management commands.

use anyhow::{bail, Result};
use orderdesk_core::credentials::{ACCOUNT_ENV, PASSWORD_ENV};
use orderdesk_config::config::CONFIG_FILE_NAME;
use orderdesk_config::ServerConfig;
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;
use crate::output::mask;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let account = ctx.credentials.account();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "config": config,
            "credentials": {
                "account": account,
                "password": mask(ctx.credentials.password()),
            },
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.kv("bind", &config.bind);
    ctx.output.kv("log_format", config.log_format.as_str());
    ctx.output.kv("bulk_concurrency", &config.bulk_concurrency.to_string());

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("endpoint", &config.api.endpoint);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());
    ctx.output
        .kv("accept_invalid_certs", &config.api.accept_invalid_certs.to_string());

    ctx.output.info("");
    ctx.output.info("Credentials:");
    let account = if account.is_empty() { "(not set)" } else { account };
    ctx.output.kv(ACCOUNT_ENV, account);
    ctx.output.kv(PASSWORD_ENV, &mask(ctx.credentials.password()));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_FILE_NAME);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    ServerConfig::default().save(&path)?;
    ctx.output
        .success(&format!("Wrote default configuration to {}", path.display()));
    ctx.output.info(&format!(
        "Set {} and {} in the environment to authenticate",
        ACCOUNT_ENV, PASSWORD_ENV
    ));
    Ok(())
}
