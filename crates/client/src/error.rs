//! Error types for the Grafana alerting client.
//!
//! Every variant carries enough context (URL or endpoint, underlying cause)
//! to diagnose a failure without re-running the call. Nothing is retried
//! internally; all errors are terminal for the call that produced them.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Grafana alerting client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The base URL could not be used to build a client.
    #[error("Invalid Grafana base URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The custom TLS transport could not be built.
    #[error("Failed to create custom transport: {0}")]
    Tls(String),

    /// Credential or token acquisition failed.
    #[error("Authentication failed ({strategy}): {source}")]
    AuthFailed {
        strategy: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The request never produced an HTTP response.
    #[error("Failed to execute request to {url}: {cause}")]
    Transport {
        url: String,
        #[source]
        cause: TransportError,
    },

    /// Grafana answered with a status other than 200.
    #[error("Grafana API returned status code {status} for {url}: {body}")]
    ApiError {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body was not a valid rules payload.
    #[error("Failed to decode rules response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Underlying cause of a [`ClientError::Transport`] failure.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The caller cancelled the call before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// The request exceeded the fixed request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or DNS failure.
    #[error(transparent)]
    Http(reqwest::Error),
}

impl ClientError {
    /// Wrap a reqwest failure for `url`, classifying timeouts separately.
    pub(crate) fn transport(url: &str, err: reqwest::Error, timeout: Duration) -> Self {
        let cause = if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else {
            TransportError::Http(err)
        };
        Self::Transport {
            url: url.to_string(),
            cause,
        }
    }

    /// Classify a failure while reading a 200 body.
    ///
    /// A body that ends early is a decode failure; timeouts and connection
    /// errors stay transport failures.
    pub(crate) fn body_read(
        url: &str,
        endpoint: &str,
        err: reqwest::Error,
        timeout: Duration,
    ) -> Self {
        if !err.is_timeout() && (err.is_body() || err.is_decode()) {
            return Self::Decode {
                endpoint: endpoint.to_string(),
                source: serde_json::Error::io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    err,
                )),
            };
        }
        Self::transport(url, err, timeout)
    }

    pub(crate) fn cancelled(url: &str) -> Self {
        Self::Transport {
            url: url.to_string(),
            cause: TransportError::Cancelled,
        }
    }

    /// True if the call was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                cause: TransportError::Cancelled,
                ..
            }
        )
    }

    /// True if the call hit the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                cause: TransportError::Timeout(_),
                ..
            }
        )
    }

    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error indicates authentication failure.
    ///
    /// Includes 401/403 answers from Grafana as well as local token acquisition failures.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthFailed { .. } => true,
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}
