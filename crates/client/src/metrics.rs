//! Metrics collection for Grafana API calls.
//!
//! This module provides metrics collection for alerting API calls, including:
//! - Request latency histograms
//! - Request counters
//! - Error categorization
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a `metrics` recorder in the host process)
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `status`, `error_category`, `auth`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::{ClientError, TransportError};
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "grafana_alerting_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "grafana_alerting_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "grafana_alerting_errors_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid base URL or transport construction
    Config,
    /// Credential or token acquisition failure
    Auth,
    /// Connection refused, DNS or TLS failure
    Transport,
    /// Request timeout
    Timeout,
    /// Caller cancelled the call
    Cancelled,
    /// HTTP 4xx answers
    Http4xx,
    /// HTTP 5xx answers
    Http5xx,
    /// Any other non-200 answer
    Api,
    /// Malformed or unexpected JSON
    Decode,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Config => "config",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Api => "api",
            ErrorCategory::Decode => "decode",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::InvalidUrl { .. } | ClientError::Tls(_) => ErrorCategory::Config,
            ClientError::AuthFailed { .. } => ErrorCategory::Auth,
            ClientError::Transport { cause, .. } => match cause {
                TransportError::Cancelled => ErrorCategory::Cancelled,
                TransportError::Timeout(_) => ErrorCategory::Timeout,
                TransportError::Http(_) => ErrorCategory::Transport,
            },
            ClientError::ApiError { status, .. } => match status {
                400..=499 => ErrorCategory::Http4xx,
                500..=599 => ErrorCategory::Http5xx,
                _ => ErrorCategory::Api,
            },
            ClientError::Decode { .. } => ErrorCategory::Decode,
        }
    }
}

/// Metrics collector for Grafana API calls.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a request attempt.
    pub fn record_request(&self, endpoint: &str, auth: &'static str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "auth" => auth,
        )
        .increment(1);
    }

    /// Record the duration of a request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(&self, endpoint: &str, duration: Duration, status: Option<u16>) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record an error, categorized automatically.
    pub fn record_client_error(&self, endpoint: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        let category = ErrorCategory::from(error);
        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Transport.as_str(), "transport");
        assert_eq!(ErrorCategory::Http4xx.as_str(), "http_4xx");
        assert_eq!(ErrorCategory::Http5xx.as_str(), "http_5xx");
        assert_eq!(ErrorCategory::Cancelled.as_str(), "cancelled");
        assert_eq!(ErrorCategory::Decode.as_str(), "decode");
    }

    #[test]
    fn test_error_categorization() {
        let cancelled = ClientError::cancelled("http://localhost:3000");
        assert_eq!(ErrorCategory::from(&cancelled), ErrorCategory::Cancelled);

        let timeout = ClientError::Transport {
            url: "u".to_string(),
            cause: TransportError::Timeout(Duration::from_secs(30)),
        };
        assert_eq!(ErrorCategory::from(&timeout), ErrorCategory::Timeout);

        let api_404 = ClientError::ApiError {
            status: 404,
            url: "u".to_string(),
            body: "not found".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_404), ErrorCategory::Http4xx);

        let api_503 = ClientError::ApiError {
            status: 503,
            url: "u".to_string(),
            body: String::new(),
        };
        assert_eq!(ErrorCategory::from(&api_503), ErrorCategory::Http5xx);

        let api_302 = ClientError::ApiError {
            status: 302,
            url: "u".to_string(),
            body: String::new(),
        };
        assert_eq!(ErrorCategory::from(&api_302), ErrorCategory::Api);

        let auth = ClientError::AuthFailed {
            strategy: "federated",
            source: anyhow::anyhow!("nope"),
        };
        assert_eq!(ErrorCategory::from(&auth), ErrorCategory::Auth);
    }

    #[test]
    fn test_metrics_collector_enabled() {
        assert!(MetricsCollector::new().is_enabled());
        assert!(!MetricsCollector::disabled().is_enabled());
        // Recording without an installed recorder is a no-op.
        MetricsCollector::new().record_request("/x", "anonymous");
    }
}
