//! Serde helpers for Grafana's loosely-typed rules payload.
//!
//! Responsibilities:
//! - Treat explicit JSON `null` like an omitted field for collections and strings.
//! - Accept either JSON numbers or numeric strings for count maps.
//! - Accept either JSON strings or numbers for string-encoded sample values.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (empty UIDs, empty groups are accepted).
//!
//! Invariants / assumptions:
//! - These helpers must not log; errors are generic parse errors.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum I64OrString {
    I64(i64),
    F64(f64),
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

/// Decode `null` as `T::default()`; pair with `#[serde(default)]` for omitted fields.
pub fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a string that some servers emit as a bare number; `null` becomes empty.
pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(StringOrNumber::String(s)) => s,
        Some(StringOrNumber::U64(v)) => v.to_string(),
        Some(StringOrNumber::I64(v)) => v.to_string(),
        Some(StringOrNumber::F64(v)) => v.to_string(),
    })
}

/// Decode an optional string, treating `""` the same as an omitted field.
pub fn opt_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Decode an optional `state -> count` map whose values may be numbers or numeric strings.
///
/// Omitted and `null` both yield `None`; an empty object yields `Some` of an empty map.
pub fn opt_counts_from_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, I64OrString>>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    let mut out = BTreeMap::new();
    for (k, v) in raw {
        let parsed = match v {
            I64OrString::I64(n) => n,
            I64OrString::F64(f) if f.fract() == 0.0 => f as i64,
            I64OrString::F64(_) => return Err(D::Error::custom("invalid count value")),
            I64OrString::String(s) => s.parse::<i64>().map_err(D::Error::custom)?,
        };
        out.insert(k, parsed);
    }
    Ok(Some(out))
}
