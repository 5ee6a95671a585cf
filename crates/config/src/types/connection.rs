//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (base URL, TLS trust material).
//! - Define the main `Config` structure combining connection and identity.
//! - Provide convenience constructors for common config patterns.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `Config::default()` targets a local development Grafana with no credentials.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GRAFANA_URL;
use crate::types::auth::IdentityConfig;
use crate::types::tls::TlsConfig;

/// Connection configuration for a Grafana server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the Grafana server (e.g., https://grafana.example.com)
    pub base_url: String,
    /// Custom TLS settings; `None` uses the platform defaults.
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl ConnectionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            tls: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Credential material
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_GRAFANA_URL)
    }
}

impl Config {
    /// Unauthenticated config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            identity: IdentityConfig::default(),
        }
    }

    /// Create a new config with the specified base URL and static API key.
    pub fn with_api_key(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            identity: IdentityConfig::with_api_key(api_key),
        }
    }

    /// Create a new config for a trusted proxy forwarding the caller's tokens.
    pub fn with_forwarded_tokens(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        id_token: impl Into<String>,
    ) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            identity: IdentityConfig::with_forwarded_tokens(access_token, id_token),
        }
    }

    /// Attach TLS settings.
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.connection.tls = Some(tls);
        self
    }
}
