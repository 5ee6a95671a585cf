//! Identity material for authenticating against Grafana.
//!
//! Responsibilities:
//! - Hold every credential a client may be configured with (forwarded
//!   access/identity tokens and a static service-account key).
//! - Normalize blank values to "absent" so callers never have to.
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Choosing which credential is used (see the client crate's `auth` module).
//! - Federated identity providers; those are runtime capabilities, not config.
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - A stored secret is never empty or whitespace-only.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Module for serializing optional SecretString values as strings.
mod opt_secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret
            .as_ref()
            .map(|s| s.expose_secret())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(super::non_blank(s))
    }
}

/// Wrap a string as a secret unless it is empty or whitespace-only.
pub(crate) fn non_blank(value: Option<String>) -> Option<SecretString> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| SecretString::new(v.into()))
}

/// Credential material a client may authenticate with.
///
/// Several fields may be populated at once; the client picks exactly one
/// strategy by fixed precedence when it is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Access token forwarded by a trusted proxy (`X-Access-Token`).
    #[serde(default, with = "opt_secret_string")]
    pub access_token: Option<SecretString>,
    /// Caller identity token forwarded alongside the access token (`X-Grafana-Id`).
    #[serde(default, with = "opt_secret_string")]
    pub id_token: Option<SecretString>,
    /// Static service-account token or legacy API key.
    #[serde(default, with = "opt_secret_string")]
    pub api_key: Option<SecretString>,
}

impl IdentityConfig {
    /// Identity with only a static API key.
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: non_blank(Some(key.into())),
            ..Self::default()
        }
    }

    /// Identity with a forwarded access token and identity token pair.
    pub fn with_forwarded_tokens(
        access_token: impl Into<String>,
        id_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: non_blank(Some(access_token.into())),
            id_token: non_blank(Some(id_token.into())),
            api_key: None,
        }
    }

    /// True when both halves of the forwarded token pair are present.
    pub fn has_forwarded_tokens(&self) -> bool {
        self.access_token.is_some() && self.id_token.is_some()
    }

    /// True when no credential material is configured at all.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.id_token.is_none() && self.api_key.is_none()
    }

    /// Drop any value that is blank after trimming.
    ///
    /// Fields set directly (bypassing the constructors) may hold empty strings.
    pub fn normalized(self) -> Self {
        let keep = |s: Option<SecretString>| s.filter(|v| !v.expose_secret().trim().is_empty());
        Self {
            access_token: keep(self.access_token),
            id_token: keep(self.id_token),
            api_key: keep(self.api_key),
        }
    }
}
