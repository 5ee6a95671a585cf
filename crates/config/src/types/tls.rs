//! TLS trust material for the HTTP transport.
//!
//! Responsibilities:
//! - Describe custom CA bundles, client certificates and verification toggles.
//! - Validate that client certificate and key are supplied together.
//!
//! Does NOT handle:
//! - Reading PEM files or building the transport (see the client crate's builder).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::ConfigError;

/// Custom TLS configuration for connecting to Grafana.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// PEM bundle of additional trusted root certificates.
    #[serde(default)]
    pub ca_file: Option<PathBuf>,
    /// PEM client certificate for mutual TLS.
    #[serde(default)]
    pub cert_file: Option<PathBuf>,
    /// PEM private key matching `cert_file`.
    #[serde(default)]
    pub key_file: Option<PathBuf>,
    /// Disable server certificate verification (development only).
    #[serde(default)]
    pub skip_verify: bool,
}

impl TlsConfig {
    /// True when nothing differs from the default transport.
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    /// Check that client certificate and key are configured as a pair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.cert_file, &self.key_file) {
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::IncompleteClientCertificate),
            _ => Ok(()),
        }
    }
}
