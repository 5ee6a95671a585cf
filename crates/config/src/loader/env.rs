//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse Grafana environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean values return ConfigError::InvalidValue.

use std::path::PathBuf;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_ACCESS_TOKEN, ENV_API_KEY, ENV_GRAFANA_URL, ENV_ID_TOKEN, ENV_SERVICE_ACCOUNT_TOKEN,
    ENV_TLS_CA_FILE, ENV_TLS_CERT_FILE, ENV_TLS_KEY_FILE, ENV_TLS_SKIP_VERIFY,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_GRAFANA_URL) {
        loader.set_base_url(Some(url));
    }

    if let Some(key) = env_var_or_none(ENV_SERVICE_ACCOUNT_TOKEN) {
        loader.set_api_key(Some(key));
    } else if let Some(key) = env_var_or_none(ENV_API_KEY) {
        tracing::warn!(
            "{} is deprecated, use {} instead",
            ENV_API_KEY,
            ENV_SERVICE_ACCOUNT_TOKEN
        );
        loader.set_api_key(Some(key));
    }

    if let Some(token) = env_var_or_none(ENV_ACCESS_TOKEN) {
        loader.set_access_token(Some(token));
    }
    if let Some(token) = env_var_or_none(ENV_ID_TOKEN) {
        loader.set_id_token(Some(token));
    }

    if let Some(path) = env_var_or_none(ENV_TLS_CA_FILE) {
        loader.set_tls_ca_file(Some(PathBuf::from(path)));
    }
    if let Some(path) = env_var_or_none(ENV_TLS_CERT_FILE) {
        loader.set_tls_cert_file(Some(PathBuf::from(path)));
    }
    if let Some(path) = env_var_or_none(ENV_TLS_KEY_FILE) {
        loader.set_tls_key_file(Some(PathBuf::from(path)));
    }
    if let Some(skip) = env_var_or_none(ENV_TLS_SKIP_VERIFY) {
        loader.set_tls_skip_verify(Some(parse_bool(ENV_TLS_SKIP_VERIFY, &skip)?));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "no").unwrap());
        let err = parse_bool("GRAFANA_TLS_SKIP_VERIFY", "maybe").unwrap_err();
        assert!(err.to_string().contains("GRAFANA_TLS_SKIP_VERIFY"));
    }
}
