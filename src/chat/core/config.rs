//! Configuration for the chat client.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::chat::core::errors::{ChatError, ChatResult};

/// Environment variable overriding the relay endpoint.
pub const ENV_RELAY_URL: &str = "PEERCHAT_RELAY_URL";
/// Environment variable overriding the `SQLite` path.
pub const ENV_DB_PATH: &str = "PEERCHAT_DB";
/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "PEERCHAT_LOG";

/// Top-level configuration for the chat client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Relay websocket endpoint.
    pub relay_url: String,
    /// Storage settings.
    pub storage: StorageConfig,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "ws://127.0.0.1:5000".to_string(),
            storage: StorageConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `PEERCHAT_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_RELAY_URL) {
            config.relay_url = url;
        }
        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            config.storage.sqlite_path = PathBuf::from(path);
        }
        if let Ok(filter) = std::env::var(ENV_LOG) {
            config.log_filter = filter;
        }
        config
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ChatResult<()> {
        let url = Url::parse(&self.relay_url)?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ChatError::InvalidConfig(format!(
                "relay_url must use ws or wss, got {}",
                url.scheme()
            )));
        }

        if self.storage.table.is_empty()
            || !self
                .storage
                .table
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(ChatError::InvalidConfig(
                "storage.table must be a non-empty identifier".to_string(),
            ));
        }

        if self.storage.sqlite_path.as_os_str().is_empty() {
            return Err(ChatError::InvalidConfig(
                "storage.sqlite_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Storage configuration for local state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `SQLite` database path.
    pub sqlite_path: PathBuf,
    /// Key-value table name.
    pub table: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("peerchat.sqlite"),
            table: "local_state".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_http_relay() {
        let config = ClientConfig {
            relay_url: "https://relay.example".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unparseable_relay() {
        let config = ClientConfig {
            relay_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChatError::Url(_))));
    }

    #[test]
    fn test_rejects_bad_table_name() {
        let mut config = ClientConfig::default();
        config.storage.table = "state; DROP".to_string();
        assert!(config.validate().is_err());
    }
}
