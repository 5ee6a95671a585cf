//! Single-attempt GET execution with status and error normalization.
//!
//! This module issues one request per call: no retries and no backoff.
//! Callers needing resilience wrap the client.
//!
//! # Invariants
//! - Every request carries `Accept` and `Content-Type: application/json`.
//! - Every request is bounded by [`REQUEST_TIMEOUT`].
//! - Non-200 bodies are read eagerly and returned inside [`ClientError::ApiError`].
//! - Cancellation drops the in-flight future, releasing its connection.

use std::time::{Duration, Instant};

use grafana_alerting_config::constants::DEFAULT_TIMEOUT_SECS;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::auth::ClientIdentity;
use crate::cancellation::CancellationToken;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Hard wall-clock bound for a single request, including reading the body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

const JSON_CONTENT_TYPE: &str = "application/json";

/// Join a normalized base URL and an absolute API path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Issue an authenticated GET for `path` and return the open 200 response.
///
/// The caller owns the response body; dropping the response closes it.
///
/// # Errors
///
/// - [`ClientError::AuthFailed`] if headers cannot be built
/// - [`ClientError::Transport`] on connection failure, timeout or cancellation
/// - [`ClientError::ApiError`] for any status other than 200
pub async fn fetch(
    client: &Client,
    base_url: &str,
    identity: &ClientIdentity,
    path: &str,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let url = join_url(base_url, path);
    let auth = identity.strategy_name();

    debug!(url = %url, auth, "Sending request to Grafana");
    if let Some(m) = metrics {
        m.record_request(path, auth);
    }

    let start = Instant::now();
    let result = match cancel.run(send(client, &url, identity)).await {
        Some(result) => result,
        None => Err(ClientError::cancelled(&url)),
    };
    let elapsed = start.elapsed();

    let status = match &result {
        Ok(response) => Some(response.status().as_u16()),
        Err(e) => e.status(),
    };
    debug!(url = %url, ?status, elapsed_ms = elapsed.as_millis() as u64, "Request finished");

    if let Some(m) = metrics {
        m.record_request_duration(path, elapsed, status);
        if let Err(e) = &result {
            m.record_client_error(path, e);
        }
    }

    result
}

async fn send(client: &Client, url: &str, identity: &ClientIdentity) -> Result<Response> {
    let auth_headers = identity.auth_headers().await?;

    let response = client
        .get(url)
        .header(ACCEPT, JSON_CONTENT_TYPE)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .headers(auth_headers)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| ClientError::transport(url, e, REQUEST_TIMEOUT))?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read response body: {}>", e));
        return Err(ClientError::ApiError {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        });
    }

    Ok(response)
}
