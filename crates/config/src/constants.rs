//! Centralized constants for the Grafana alerting workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Base URL used when neither the environment nor the caller provides one.
pub const DEFAULT_GRAFANA_URL: &str = "http://localhost:3000";

/// HTTP request timeout in seconds. Applied to every request; not overridable per call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_GRAFANA_URL: &str = "GRAFANA_URL";
pub const ENV_SERVICE_ACCOUNT_TOKEN: &str = "GRAFANA_SERVICE_ACCOUNT_TOKEN";
/// Deprecated alias for [`ENV_SERVICE_ACCOUNT_TOKEN`].
pub const ENV_API_KEY: &str = "GRAFANA_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "GRAFANA_ACCESS_TOKEN";
pub const ENV_ID_TOKEN: &str = "GRAFANA_ID_TOKEN";
pub const ENV_TLS_CA_FILE: &str = "GRAFANA_TLS_CA_FILE";
pub const ENV_TLS_CERT_FILE: &str = "GRAFANA_TLS_CERT_FILE";
pub const ENV_TLS_KEY_FILE: &str = "GRAFANA_TLS_KEY_FILE";
pub const ENV_TLS_SKIP_VERIFY: &str = "GRAFANA_TLS_SKIP_VERIFY";
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
