use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "accountd.toml",
    "config/accountd.toml",
    "crates/config/accountd.toml",
    "../accountd.toml",
    "../config/accountd.toml",
    "../crates/config/accountd.toml",
];

/// Environment variable the legacy deployment used for the signing secret.
const LEGACY_SECRET_VAR: &str = "SECRET";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://accountd.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Absence at startup is fatal; there is no
    /// per-request fallback.
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "AuthConfig::default_token_ttl_days")]
    pub token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_ttl_days: Self::default_token_ttl_days(),
        }
    }
}

impl AuthConfig {
    fn default_token_ttl_days() -> i64 {
        7
    }
}

/// Load the application configuration by combining defaults, an optional
/// config file, and environment overrides (`ACCOUNTD__SECTION__KEY`).
///
/// ```
/// std::env::remove_var("ACCOUNTD_CONFIG");
///
/// let config = accountd_config::load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("auth.token_ttl_days", defaults.auth.token_ttl_days)
        .unwrap();

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ACCOUNTD_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ACCOUNTD_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(config::Environment::with_prefix("ACCOUNTD").separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.secret.is_none() {
        if let Ok(secret) = std::env::var(LEGACY_SECRET_VAR) {
            if !secret.is_empty() {
                config.auth.secret = Some(secret);
            }
        }
    }

    debug!(
        address = %config.http.address,
        port = config.http.port,
        database = %config.database.url,
        secret_configured = config.auth.secret.is_some(),
        "loaded configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_without_sources() {
        std::env::remove_var("ACCOUNTD_CONFIG");
        std::env::remove_var(LEGACY_SECRET_VAR);

        let config = load().expect("load should succeed");
        assert_eq!(config.http.port, 7070);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.token_ttl_days, 7);
        assert!(config.auth.secret.is_none());
    }

    #[test]
    #[serial]
    fn legacy_secret_env_var_is_honoured() {
        std::env::remove_var("ACCOUNTD_CONFIG");
        std::env::set_var(LEGACY_SECRET_VAR, "hunter2");

        let config = load().expect("load should succeed");
        assert_eq!(config.auth.secret.as_deref(), Some("hunter2"));

        std::env::remove_var(LEGACY_SECRET_VAR);
    }

    #[test]
    #[serial]
    fn environment_overrides_take_effect() {
        std::env::remove_var("ACCOUNTD_CONFIG");
        std::env::set_var("ACCOUNTD__HTTP__PORT", "9090");

        let config = load().expect("load should succeed");
        assert_eq!(config.http.port, 9090);

        std::env::remove_var("ACCOUNTD__HTTP__PORT");
    }
}
