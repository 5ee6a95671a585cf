//! Property-based tests for configuration building and serialization.
//!
//! Test coverage:
//! - Config: Roundtrip serialization with connection, TLS and identity
//! - ConfigLoader: Credentials survive `build()` exactly when non-blank
//! - ConfigLoader: Forwarded tokens only count as a pair

use proptest::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use grafana_alerting_config::{Config, ConfigLoader, IdentityConfig, TlsConfig};

/// Strategy for generating valid base URLs.
fn base_url_strategy() -> impl Strategy<Value = String> {
    let localhost_strategy =
        (3000u16..=3010u16).prop_map(|port| format!("http://localhost:{}", port));

    let host_strategy = prop_oneof![
        Just("grafana"),
        Just("grafana-dev"),
        Just("monitoring"),
        Just("observability"),
    ];
    let domain_strategy = prop_oneof![
        Just("example.com"),
        Just("internal.local"),
        Just("grafana.net"),
    ];

    let production_strategy = (host_strategy, domain_strategy)
        .prop_map(|(host, domain)| format!("https://{}.{}", host, domain));

    prop_oneof![localhost_strategy, production_strategy]
}

/// Strategy for generating service account token strings.
fn token_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{16,48}".prop_map(|s| format!("glsa_{}", s))
}

/// Strategy for strings that are empty or whitespace-only.
fn blank_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

fn tls_strategy() -> impl Strategy<Value = Option<TlsConfig>> {
    proptest::option::of((any::<bool>(), any::<bool>()).prop_map(|(with_ca, skip_verify)| {
        TlsConfig {
            ca_file: with_ca.then(|| "/etc/ssl/grafana-ca.pem".into()),
            skip_verify,
            ..TlsConfig::default()
        }
    }))
}

proptest! {
    #[test]
    fn prop_config_roundtrip(
        base_url in base_url_strategy(),
        token in token_strategy(),
        tls in tls_strategy(),
    ) {
        let mut config = Config::with_api_key(base_url.clone(), token.clone());
        config.connection.tls = tls.clone();

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(back.connection.base_url, base_url);
        prop_assert_eq!(back.connection.tls, tls);
        prop_assert_eq!(
            back.identity.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some(token)
        );
    }

    #[test]
    fn prop_non_blank_api_key_survives_build(token in token_strategy()) {
        let config = ConfigLoader::new().with_api_key(token.clone()).build().unwrap();
        prop_assert_eq!(
            config.identity.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some(token)
        );
    }

    #[test]
    fn prop_blank_api_key_is_dropped(blank in blank_strategy()) {
        let config = ConfigLoader::new().with_api_key(blank).build().unwrap();
        prop_assert!(config.identity.api_key.is_none());
        prop_assert!(config.identity.is_empty());
    }

    #[test]
    fn prop_forwarded_tokens_require_both_halves(
        access in prop_oneof![token_strategy(), blank_strategy()],
        id in prop_oneof![token_strategy(), blank_strategy()],
    ) {
        let config = ConfigLoader::new()
            .with_forwarded_tokens(access.clone(), id.clone())
            .build()
            .unwrap();

        let expected = !access.trim().is_empty() && !id.trim().is_empty();
        prop_assert_eq!(config.identity.has_forwarded_tokens(), expected);
    }

    #[test]
    fn prop_identity_normalized_is_idempotent(
        access in prop_oneof![token_strategy(), blank_strategy()],
        key in prop_oneof![token_strategy(), blank_strategy()],
    ) {
        let identity = IdentityConfig {
            access_token: Some(SecretString::new(access.into())),
            id_token: None,
            api_key: Some(SecretString::new(key.into())),
        };
        let once = identity.normalized();
        let twice = once.clone().normalized();

        prop_assert_eq!(once.access_token.is_some(), twice.access_token.is_some());
        prop_assert_eq!(once.api_key.is_some(), twice.api_key.is_some());
    }
}
