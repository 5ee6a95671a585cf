//! Rules endpoint for Grafana-managed alert rules.
//!
//! # What this module handles:
//! - Fetching `/api/prometheus/grafana/api/v1/rules`
//! - Decoding the body into [`RulesResponse`]
//!
//! # What this module does NOT handle:
//! - Following `groupNextToken`; callers inspect [`RulesResponse::next_token`]

use reqwest::Client;
use tracing::debug;

use crate::auth::ClientIdentity;
use crate::cancellation::CancellationToken;
use crate::decode::decode_rules;
use crate::endpoints::request::{REQUEST_TIMEOUT, fetch};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::RulesResponse;

/// Relative path of the Prometheus-compatible rules listing.
pub const RULES_ENDPOINT_PATH: &str = "/api/prometheus/grafana/api/v1/rules";

/// Fetch and decode the current alert rule evaluation state.
pub async fn get_rules(
    client: &Client,
    base_url: &str,
    identity: &ClientIdentity,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<RulesResponse> {
    let response = fetch(
        client,
        base_url,
        identity,
        RULES_ENDPOINT_PATH,
        cancel,
        metrics,
    )
    .await?;

    let url = response.url().to_string();
    let result = match cancel.run(response.bytes()).await {
        Some(Ok(body)) => decode_rules(&body[..], RULES_ENDPOINT_PATH),
        Some(Err(e)) => Err(ClientError::body_read(
            &url,
            RULES_ENDPOINT_PATH,
            e,
            REQUEST_TIMEOUT,
        )),
        None => Err(ClientError::cancelled(&url)),
    };

    match &result {
        Ok(rules) => debug!(
            groups = rules.groups.len(),
            rules = rules.rule_count(),
            has_more = rules.has_more_pages(),
            "Decoded rules response"
        ),
        Err(e) => {
            debug!(url = %url, error = %e, "Failed to read rules response");
            if let Some(m) = metrics {
                m.record_client_error(RULES_ENDPOINT_PATH, e);
            }
        }
    }
    result
}
