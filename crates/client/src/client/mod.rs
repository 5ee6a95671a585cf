//! Grafana alerting client and its API methods.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Credential selection (delegated to [`crate::auth::ClientIdentity`])
//!
//! # Invariants
//! - The authentication strategy is fixed when the client is built
//! - Concurrent calls share only the pooled HTTP transport

pub mod builder;

use crate::auth::ClientIdentity;
use crate::cancellation::CancellationToken;
use crate::endpoints;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::RulesResponse;

/// Read-only client for Grafana's alert rule evaluation state.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// ```rust,ignore
/// let client = AlertingClient::builder()
///     .base_url("https://grafana.example.com")
///     .identity(IdentityConfig::with_api_key("glsa_..."))
///     .build()?;
///
/// for group in client.get_rules().await?.groups {
///     println!("{}: {} rules", group.name, group.rules.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AlertingClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) identity: ClientIdentity,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl AlertingClient {
    /// Create a new client builder.
    pub fn builder() -> builder::AlertingClientBuilder {
        builder::AlertingClientBuilder::new()
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The authentication strategy chosen at build time.
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Fetch the current state of all Grafana-managed alert rules.
    ///
    /// Only the first page is returned; check [`RulesResponse::next_token`].
    pub async fn get_rules(&self) -> Result<RulesResponse> {
        self.get_rules_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`get_rules`](Self::get_rules), aborting when `cancel` fires.
    ///
    /// A cancelled call fails with a transport error for which
    /// [`ClientError::is_cancelled`](crate::ClientError::is_cancelled) is true.
    pub async fn get_rules_with_cancel(&self, cancel: &CancellationToken) -> Result<RulesResponse> {
        endpoints::get_rules(
            &self.http,
            &self.base_url,
            &self.identity,
            cancel,
            self.metrics.as_ref(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use grafana_alerting_config::IdentityConfig;

    #[test]
    fn test_client_builder_with_api_key() {
        let client = AlertingClient::builder()
            .base_url("https://grafana.example.com")
            .identity(IdentityConfig::with_api_key("glsa_token"))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://grafana.example.com");
        assert!(matches!(client.identity(), ClientIdentity::ApiKey(_)));
    }

    #[test]
    fn test_client_builder_without_credentials_is_anonymous() {
        let client = AlertingClient::builder()
            .base_url("http://localhost:3000")
            .build()
            .unwrap();
        assert!(matches!(client.identity(), ClientIdentity::Anonymous));
    }

    #[test]
    fn test_client_builder_normalizes_base_url() {
        let client = AlertingClient::builder()
            .base_url("https://grafana.example.com/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://grafana.example.com");
    }

    #[test]
    fn test_client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<AlertingClient>();
    }

    #[tokio::test]
    async fn test_precancelled_call_fails_without_io() {
        // Port 9 (discard) would fail to connect; cancellation must win first.
        let client = AlertingClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client.get_rules_with_cancel(&cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(!matches!(err, ClientError::Decode { .. }));
    }
}
