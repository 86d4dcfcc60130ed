//! Server settings
//!
//! Defaults, overridden by `KIP_*` environment variables, with the
//! conventional `PORT` variable replacing the port of the bind address.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/kipkuliah.db";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Empty means run without a persistent store
    pub database_url: String,
    pub connect_timeout_secs: u64,
    pub create_if_missing: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let env = config::Environment::with_prefix("KIP").try_parsing(true);
        let config = Self::from_source(env)?;
        Ok(config.with_port(std::env::var("PORT").ok().as_deref()))
    }

    fn from_source(env: config::Environment) -> Result<Self> {
        config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("connect_timeout_secs", 5)?
            .set_default("create_if_missing", true)?
            .add_source(env)
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Replace the port of `bind_address`, keeping its host.
    fn with_port(mut self, port: Option<&str>) -> Self {
        if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
            let host = self
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            self.bind_address = format!("{}:{}", host, port);
        }
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn persistence_enabled(&self) -> bool {
        !self.database_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("KIP")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert!(config.create_if_missing);
        assert!(config.persistence_enabled());
    }

    #[test]
    fn test_environment_overrides() {
        let config = ServerConfig::from_source(env(&[
            ("KIP_BIND_ADDRESS", "127.0.0.1:8080"),
            ("KIP_DATABASE_URL", ""),
            ("KIP_CONNECT_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.connect_timeout_secs, 2);
        assert!(!config.persistence_enabled());
    }

    #[test]
    fn test_port_override() {
        let config = ServerConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.clone().with_port(Some("3000")).bind_address, "0.0.0.0:3000");
        assert_eq!(config.clone().with_port(Some(" ")).bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.with_port(None).bind_address, DEFAULT_BIND_ADDRESS);
    }
}
