//! Server configuration
//!
//! Layered with figment: built-in defaults, then an optional YAML file, then
//! `FPACK__` environment variables (`FPACK__SERVER__BIND_ADDR=0.0.0.0:9000`).

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use fpack_service::Config as FpackConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "FPACK__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub modules: ModulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            run_migrations: default_run_migrations(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL with any credentials masked, safe for logs and errors
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://").map(|i| i + 3) else {
            return self.url.clone();
        };
        let rest = &self.url[scheme_end..];
        let authority_end = rest
            .find(|c| matches!(c, '/' | '?' | '#'))
            .unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{}***{}", &self.url[..scheme_end], &rest[at..]),
            None => self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// EnvFilter directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModulesConfig {
    #[serde(default)]
    pub fpack_service: FpackConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_string()
}

fn default_database_url() -> String {
    "sqlite://fpack.db?mode=rwc".to_string()
}

fn default_run_migrations() -> bool {
    true
}

fn default_log_level() -> String {
    "info,fpack_service=debug".to_string()
}

impl AppConfig {
    /// Provider stack without the environment layer
    fn base(path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()));
        match path {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment,
        }
    }

    /// Load defaults, the optional YAML file and `FPACK__` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
        }

        Self::base(path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }
}
