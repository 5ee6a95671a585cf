//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges `.env`, environment
//!   variables and explicit builder calls into a `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Calls made after `from_env()` override environment values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_GRAFANA_URL, ENV_DOTENV_DISABLED};
use crate::types::auth::non_blank;
use crate::types::{Config, ConnectionConfig, IdentityConfig, TlsConfig};

/// Configuration loader that builds config from environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    api_key: Option<String>,
    access_token: Option<String>,
    id_token: Option<String>,
    tls_ca_file: Option<PathBuf>,
    tls_cert_file: Option<PathBuf>,
    tls_key_file: Option<PathBuf>,
    tls_skip_verify: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the static API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the forwarded access token and identity token.
    pub fn with_forwarded_tokens(
        mut self,
        access_token: impl Into<String>,
        id_token: impl Into<String>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.id_token = Some(id_token.into());
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_tls_skip_verify(mut self, skip: bool) -> Self {
        self.tls_skip_verify = Some(skip);
        self
    }

    /// Set the CA bundle used to verify the server.
    pub fn with_tls_ca_file(mut self, path: PathBuf) -> Self {
        self.tls_ca_file = Some(path);
        self
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_api_key(&mut self, key: Option<String>) {
        self.api_key = key;
    }

    pub(crate) fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub(crate) fn set_id_token(&mut self, token: Option<String>) {
        self.id_token = token;
    }

    pub(crate) fn set_tls_ca_file(&mut self, path: Option<PathBuf>) {
        self.tls_ca_file = path;
    }

    pub(crate) fn set_tls_cert_file(&mut self, path: Option<PathBuf>) {
        self.tls_cert_file = path;
    }

    pub(crate) fn set_tls_key_file(&mut self, path: Option<PathBuf>) {
        self.tls_key_file = path;
    }

    pub(crate) fn set_tls_skip_verify(&mut self, skip: Option<bool>) {
        self.tls_skip_verify = skip;
    }

    /// Get the base URL if set.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn tls(&self) -> Option<TlsConfig> {
        let tls = TlsConfig {
            ca_file: self.tls_ca_file.clone(),
            cert_file: self.tls_cert_file.clone(),
            key_file: self.tls_key_file.clone(),
            skip_verify: self.tls_skip_verify.unwrap_or(false),
        };
        (!tls.is_default()).then_some(tls)
    }

    /// Build the final configuration.
    ///
    /// Falls back to `http://localhost:3000` when no base URL was provided.
    /// The URL itself is validated by the client when it is constructed.
    pub fn build(self) -> Result<Config, ConfigError> {
        let tls = self.tls();
        if let Some(tls) = &tls {
            tls.validate()?;
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_GRAFANA_URL.to_string());

        let identity = IdentityConfig {
            access_token: non_blank(self.access_token),
            id_token: non_blank(self.id_token),
            api_key: non_blank(self.api_key),
        };

        if identity.access_token.is_some() != identity.id_token.is_some() {
            tracing::debug!(
                "Only one of the forwarded access/id tokens is set; forwarded authentication will not be used"
            );
        }

        Ok(Config {
            connection: ConnectionConfig { base_url, tls },
            identity,
        })
    }
}
