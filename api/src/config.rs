//! Layered configuration loading for the server binary
//!
//! Precedence, lowest first: built-in defaults and the plain environment
//! variables read by `AppConfig::from_env`, then an optional
//! `config/<environment>.{toml,json,yaml}` file, then `KEYSTONE__*` variables
//! (`KEYSTONE__SERVER__PORT=8081`, `KEYSTONE__LEDGER__BACKEND=redis`).

use anyhow::Context;
use config::{Config, Environment as EnvSource, File};
use ks_shared::config::AppConfig;

/// Prefix of the structured override variables
pub const ENV_PREFIX: &str = "KEYSTONE";

/// Load and validate the application configuration
pub fn load() -> anyhow::Result<AppConfig> {
    let base = AppConfig::from_env();
    let file = base.environment.config_file().to_string();
    load_layered(base, Some(&file), ENV_PREFIX)
}

/// Layer an optional file and prefixed environment variables over `base`
pub fn load_layered(
    base: AppConfig,
    file: Option<&str>,
    env_prefix: &str,
) -> anyhow::Result<AppConfig> {
    let mut builder = Config::builder()
        .add_source(Config::try_from(&base).context("Failed to serialize base configuration")?);

    if let Some(file) = file {
        builder = builder.add_source(File::with_name(file).required(false));
    }

    let config: AppConfig = builder
        .add_source(
            EnvSource::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to assemble configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
