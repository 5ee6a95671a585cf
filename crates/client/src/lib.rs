//! Grafana alerting rules client.
//!
//! This crate fetches the evaluation state of Grafana-managed alert rules
//! from the Prometheus-compatible rules API and decodes it into typed models.
//! It supports forwarded-token, federated-identity and API-key authentication.

pub mod auth;
mod cancellation;
pub mod client;
mod decode;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{
    ACCESS_TOKEN_HEADER, ClientIdentity, GRAFANA_AAD_RESOURCE, ID_TOKEN_HEADER,
    StaticTokenCredential, TokenCredential,
};
pub use cancellation::CancellationToken;
pub use client::AlertingClient;
pub use client::builder::AlertingClientBuilder;
pub use decode::decode_rules;
pub use error::{ClientError, Result, TransportError};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    AlertInstance, AlertingRule, Labels, RuleGroup, RulesResponse, StateCounts,
};
