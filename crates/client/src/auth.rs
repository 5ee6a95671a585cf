//! Credential resolution and authentication headers.
//!
//! A client is configured with a bundle of possible credentials. Exactly one
//! strategy is picked when the client is built, by fixed precedence:
//!
//! 1. Forwarded access token + identity token (trusted proxy) -> `X-Access-Token` and `X-Grafana-Id`
//! 2. Federated identity provider -> `Authorization: Bearer <token for GRAFANA_AAD_RESOURCE>`
//! 3. Static API key -> `Authorization: Bearer <key>`
//! 4. Nothing -> unauthenticated request
//!
//! Only the federated strategy performs I/O, and only when headers are built.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use grafana_alerting_config::IdentityConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Resource scope requested from the federated identity provider.
///
/// Identifies the Grafana API as the audience of the token. Not configurable.
pub const GRAFANA_AAD_RESOURCE: &str = "ce34e7e5-485f-4d76-964f-b3d2b16d1e4f";

/// Header carrying a forwarded access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

/// Header carrying the forwarded caller identity token.
pub const ID_TOKEN_HEADER: &str = "X-Grafana-Id";

/// A federated identity provider able to mint short-lived bearer tokens.
///
/// Implementations own their caching and refresh; the client asks for a
/// token once per request.
#[async_trait]
pub trait TokenCredential: Send + Sync + fmt::Debug {
    /// Obtain a bearer token valid for the given scopes.
    async fn get_token(&self, scopes: &[&str]) -> anyhow::Result<SecretString>;
}

/// A [`TokenCredential`] that always returns the same pre-acquired token.
#[derive(Debug, Clone)]
pub struct StaticTokenCredential {
    token: SecretString,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into().into()),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[&str]) -> anyhow::Result<SecretString> {
        Ok(self.token.clone())
    }
}

/// The authentication strategy a client uses for every request it issues.
#[derive(Debug, Clone)]
pub enum ClientIdentity {
    /// Trusted-proxy forwarding of the caller's access and identity tokens.
    Forwarded {
        access_token: SecretString,
        id_token: SecretString,
    },
    /// Bearer token minted per request by a federated identity provider.
    Federated(Arc<dyn TokenCredential>),
    /// Static service-account token or API key.
    ApiKey(SecretString),
    /// No credentials; requests are sent unauthenticated.
    Anonymous,
}

impl ClientIdentity {
    /// Pick exactly one strategy from the available credential material.
    ///
    /// First match wins: forwarded pair, federated provider, API key, anonymous.
    pub fn resolve(
        identity: &IdentityConfig,
        federated: Option<Arc<dyn TokenCredential>>,
    ) -> Self {
        let identity = identity.clone().normalized();

        if let (Some(access_token), Some(id_token)) = (identity.access_token, identity.id_token) {
            return Self::Forwarded {
                access_token,
                id_token,
            };
        }
        if let Some(credential) = federated {
            return Self::Federated(credential);
        }
        if let Some(key) = identity.api_key {
            return Self::ApiKey(key);
        }
        Self::Anonymous
    }

    /// Short name of the active strategy, safe for logs and metrics.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::Forwarded { .. } => "forwarded",
            Self::Federated(_) => "federated",
            Self::ApiKey(_) => "api_key",
            Self::Anonymous => "anonymous",
        }
    }

    /// Build the authentication headers for one request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the federated provider cannot
    /// produce a token or a credential is not a valid header value.
    pub async fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        match self {
            Self::Forwarded {
                access_token,
                id_token,
            } => {
                headers.insert(
                    HeaderName::from_static("x-access-token"),
                    self.sensitive_value(access_token.expose_secret())?,
                );
                headers.insert(
                    HeaderName::from_static("x-grafana-id"),
                    self.sensitive_value(id_token.expose_secret())?,
                );
            }
            Self::Federated(credential) => {
                let token = credential
                    .get_token(&[GRAFANA_AAD_RESOURCE])
                    .await
                    .map_err(|source| ClientError::AuthFailed {
                        strategy: self.strategy_name(),
                        source: source.context("failed to get token for alerting client"),
                    })?;
                headers.insert(AUTHORIZATION, self.bearer(token.expose_secret())?);
            }
            Self::ApiKey(key) => {
                headers.insert(AUTHORIZATION, self.bearer(key.expose_secret())?);
            }
            Self::Anonymous => {}
        }

        Ok(headers)
    }

    fn bearer(&self, token: &str) -> Result<HeaderValue> {
        self.sensitive_value(&format!("Bearer {}", token))
    }

    fn sensitive_value(&self, value: &str) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(value)
            .context("credential contains characters not allowed in an HTTP header")
            .map_err(|source| ClientError::AuthFailed {
                strategy: self.strategy_name(),
                source,
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}
