use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

#[derive(Deserialize)]
pub struct SSLConfig {
    pub private_key_file: PathBuf,
    pub certificate_chain_file: PathBuf,
}

/// Connection details for the external identity provider. Tokens are issued
/// and revoked by the provider; `jwt_secret` is the shared secret its access
/// tokens are signed with, used to validate them locally.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub provider_url: String,
    pub api_key: String,
    pub jwt_secret: String,
}

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
    pub signups_enabled: bool,
    pub honeycomb_api_key: String,
    pub auth: AuthConfig,
    pub ssl: Option<SSLConfig>,
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        let config: Config =
            toml::from_str(config.as_str()).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        let signups_enabled = read_env("SIGNUPS_ENABLED")?;
        let signups_enabled = signups_enabled
            .parse()
            .context("Unable to parse SIGNUPS_ENABLED value")?;
        let database_url = read_env("DATABASE_URL")?;
        let honeycomb_api_key = read_env("HONEYCOMB_API_KEY")?;
        let auth = AuthConfig {
            provider_url: read_env("AUTH_PROVIDER_URL")?,
            api_key: read_env("AUTH_API_KEY")?,
            jwt_secret: read_env("AUTH_JWT_SECRET")?,
        };

        let config = Config {
            database_url,
            signups_enabled,
            honeycomb_api_key,
            auth,
            ssl: None,
        };
        Ok(config)
    }
}

fn read_env(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).with_context(|| format!("Unable to read env var: {}", key))
}
