//! Client builder for constructing [`AlertingClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing the base URL (removing trailing slashes)
//! - Building the HTTP transport from TLS settings, or accepting an injected one
//! - Resolving the authentication strategy once, up front
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`AlertingClient`] methods in `mod.rs`)
//! - Header construction (handled by [`ClientIdentity`] in `auth.rs`)
//!
//! # Invariants
//! - `base_url` is required and must be an absolute `http` or `https` URL
//!   with no query string or fragment
//! - The base URL is always normalized to have no trailing slashes
//! - An injected `http_client` takes precedence over TLS settings

use std::fs;
use std::path::Path;
use std::sync::Arc;

use grafana_alerting_config::{
    Config, IdentityConfig, TlsConfig, constants::DEFAULT_MAX_REDIRECTS,
};
use reqwest::{Certificate, Identity};
use url::Url;

use crate::auth::{ClientIdentity, TokenCredential};
use crate::client::AlertingClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`AlertingClient`].
///
/// # Example
///
/// ```rust,ignore
/// use grafana_alerting_client::AlertingClient;
/// use grafana_alerting_config::IdentityConfig;
///
/// let client = AlertingClient::builder()
///     .base_url("https://grafana.example.com")
///     .identity(IdentityConfig::with_api_key("glsa_..."))
///     .build()?;
/// ```
#[derive(Default)]
pub struct AlertingClientBuilder {
    base_url: Option<String>,
    identity: IdentityConfig,
    federated: Option<Arc<dyn TokenCredential>>,
    http_client: Option<reqwest::Client>,
    tls: Option<TlsConfig>,
    metrics: Option<MetricsCollector>,
}

impl AlertingClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Grafana server, e.g. `https://grafana.example.com`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the static credential material (forwarded tokens, API key).
    pub fn identity(mut self, identity: IdentityConfig) -> Self {
        self.identity = identity;
        self
    }

    /// Set a federated identity provider.
    ///
    /// Takes precedence over an API key, but not over a forwarded token pair.
    pub fn federated_credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.federated = Some(credential);
        self
    }

    /// Use a caller-supplied HTTP transport instead of building one.
    ///
    /// TLS settings are ignored when a transport is injected.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set custom TLS trust material.
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Set the metrics collector for request tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from loaded configuration.
    ///
    /// ```rust,ignore
    /// let config = ConfigLoader::new().load_dotenv()?.from_env()?.build()?;
    /// let client = AlertingClient::builder().from_config(&config).build()?;
    /// ```
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.identity = config.identity.clone();
        self.tls = config.connection.tls.clone();
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://grafana.example.com/"` -> `"https://grafana.example.com"`
    /// - `"https://grafana.example.com//"` -> `"https://grafana.example.com"`
    pub(crate) fn normalize_base_url(url: &str) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    fn validate_base_url(base_url: &str) -> Result<()> {
        let invalid = |message: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            message,
        };

        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme {:?}", other))),
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        // Endpoint paths are appended to the base URL as text.
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid(
                "query string or fragment not allowed in base URL".to_string(),
            ));
        }
        Ok(())
    }

    fn build_http_client(base_url: &str, tls: Option<&TlsConfig>) -> Result<reqwest::Client> {
        let mut http_builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if let Some(tls) = tls.filter(|t| !t.is_default()) {
            tls.validate().map_err(|e| ClientError::Tls(e.to_string()))?;

            if let Some(ca_file) = &tls.ca_file {
                let pem = read_pem(ca_file, "CA certificate")?;
                let certs = Certificate::from_pem_bundle(&pem).map_err(|e| {
                    ClientError::Tls(format!("invalid CA certificate {}: {}", ca_file.display(), e))
                })?;
                for cert in certs {
                    http_builder = http_builder.add_root_certificate(cert);
                }
            }

            if let (Some(cert_file), Some(key_file)) = (&tls.cert_file, &tls.key_file) {
                let mut pem = read_pem(cert_file, "client certificate")?;
                pem.push(b'\n');
                pem.extend(read_pem(key_file, "client key")?);
                let identity = Identity::from_pem(&pem).map_err(|e| {
                    ClientError::Tls(format!("invalid client certificate or key: {}", e))
                })?;
                http_builder = http_builder.identity(identity);
            }

            if tls.skip_verify {
                if base_url.starts_with("https://") {
                    http_builder = http_builder.danger_accept_invalid_certs(true);
                } else {
                    tracing::warn!(
                        "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                    );
                }
            }
        }

        http_builder
            .build()
            .map_err(|e| ClientError::Tls(e.to_string()))
    }

    /// Build the [`AlertingClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or unusable.
    /// Returns [`ClientError::Tls`] if the TLS transport cannot be built.
    pub fn build(self) -> Result<AlertingClient> {
        let base_url = self.base_url.ok_or_else(|| ClientError::InvalidUrl {
            url: String::new(),
            message: "base_url is required".to_string(),
        })?;
        let base_url = Self::normalize_base_url(&base_url);
        Self::validate_base_url(&base_url)?;

        let http = match self.http_client {
            Some(client) => {
                if self.tls.is_some() {
                    tracing::debug!("Injected HTTP client in use; ignoring TLS settings");
                }
                client
            }
            None => Self::build_http_client(&base_url, self.tls.as_ref())?,
        };

        let identity = ClientIdentity::resolve(&self.identity, self.federated);
        tracing::debug!(
            base_url = %base_url,
            auth = identity.strategy_name(),
            "Built Grafana alerting client"
        );

        Ok(AlertingClient {
            http,
            base_url,
            identity,
            metrics: self.metrics,
        })
    }
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>> {
    fs::read(path)
        .map_err(|e| ClientError::Tls(format!("failed to read {} {}: {}", what, path.display(), e)))
}
