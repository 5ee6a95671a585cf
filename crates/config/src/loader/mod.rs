//! Configuration loader for `.env` files and environment variables.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Invariants / Assumptions:
//! - Builder calls made after `from_env()` take precedence over the environment.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::path::PathBuf;

    const GRAFANA_VARS: &[&str] = &[
        "GRAFANA_URL",
        "GRAFANA_SERVICE_ACCOUNT_TOKEN",
        "GRAFANA_API_KEY",
        "GRAFANA_ACCESS_TOKEN",
        "GRAFANA_ID_TOKEN",
        "GRAFANA_TLS_CA_FILE",
        "GRAFANA_TLS_CERT_FILE",
        "GRAFANA_TLS_KEY_FILE",
        "GRAFANA_TLS_SKIP_VERIFY",
    ];

    /// Run `f` with every Grafana variable unset except the given overrides.
    fn with_grafana_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = GRAFANA_VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        with_grafana_env(&[], || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.base_url, "http://localhost:3000");
            assert!(config.connection.tls.is_none());
            assert!(config.identity.is_empty());
        });
    }

    #[test]
    #[serial]
    fn test_env_values_are_trimmed() {
        with_grafana_env(
            &[
                ("GRAFANA_URL", "  https://grafana.example.com/  "),
                ("GRAFANA_SERVICE_ACCOUNT_TOKEN", " glsa_token "),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.connection.base_url, "https://grafana.example.com/");
                assert_eq!(
                    config.identity.api_key.unwrap().expose_secret(),
                    "glsa_token"
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_service_account_token_wins_over_deprecated_api_key() {
        with_grafana_env(
            &[
                ("GRAFANA_SERVICE_ACCOUNT_TOKEN", "new-token"),
                ("GRAFANA_API_KEY", "old-key"),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert_eq!(config.identity.api_key.unwrap().expose_secret(), "new-token");
            },
        );
    }

    #[test]
    #[serial]
    fn test_deprecated_api_key_still_read() {
        with_grafana_env(&[("GRAFANA_API_KEY", "old-key")], || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.identity.api_key.unwrap().expose_secret(), "old-key");
        });
    }

    #[test]
    #[serial]
    fn test_blank_env_vars_are_unset() {
        with_grafana_env(
            &[("GRAFANA_ACCESS_TOKEN", "   "), ("GRAFANA_ID_TOKEN", "")],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert!(config.identity.access_token.is_none());
                assert!(config.identity.id_token.is_none());
            },
        );
    }

    #[test]
    #[serial]
    fn test_forwarded_tokens_from_env() {
        with_grafana_env(
            &[
                ("GRAFANA_ACCESS_TOKEN", "access"),
                ("GRAFANA_ID_TOKEN", "identity"),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                assert!(config.identity.has_forwarded_tokens());
            },
        );
    }

    #[test]
    #[serial]
    fn test_tls_from_env() {
        with_grafana_env(
            &[
                ("GRAFANA_TLS_CA_FILE", "/etc/grafana/ca.pem"),
                ("GRAFANA_TLS_SKIP_VERIFY", "true"),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
                let tls = config.connection.tls.unwrap();
                assert_eq!(tls.ca_file, Some(PathBuf::from("/etc/grafana/ca.pem")));
                assert!(tls.skip_verify);
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_skip_verify_is_rejected() {
        with_grafana_env(&[("GRAFANA_TLS_SKIP_VERIFY", "sometimes")], || {
            let err = ConfigLoader::new().from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "GRAFANA_TLS_SKIP_VERIFY"));
        });
    }

    #[test]
    #[serial]
    fn test_cert_without_key_is_rejected() {
        with_grafana_env(&[("GRAFANA_TLS_CERT_FILE", "/tmp/client.pem")], || {
            let err = ConfigLoader::new()
                .from_env()
                .unwrap()
                .build()
                .unwrap_err();
            assert!(matches!(err, ConfigError::IncompleteClientCertificate));
        });
    }

    #[test]
    #[serial]
    fn test_builder_overrides_env() {
        with_grafana_env(&[("GRAFANA_URL", "https://env.example.com")], || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_base_url("https://explicit.example.com")
                .with_api_key("explicit-key")
                .build()
                .unwrap();
            assert_eq!(config.connection.base_url, "https://explicit.example.com");
            assert!(config.identity.api_key.is_some());
        });
    }

    #[test]
    #[serial]
    fn test_dotenv_disabled_skips_loading() {
        temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
        });
    }

    #[test]
    #[serial]
    fn test_invalid_dotenv_does_not_leak_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "LOADER_TEST_SECRET=super-secret-value\nINVALID_LINE_WITHOUT_EQUALS",
        )
        .unwrap();

        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let result = temp_env::with_var_unset("DOTENV_DISABLED", || {
            ConfigLoader::new().load_dotenv()
        });
        std::env::set_current_dir(original).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::DotenvParse { .. }));
        assert!(!err.to_string().contains("super-secret-value"));
    }
}
