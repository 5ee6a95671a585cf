//! Response decoding for the rules endpoint.
//!
//! Decoding is purely structural: any payload that matches the shape of
//! [`RulesResponse`] is accepted, including rules with empty UIDs and groups
//! with no rules. Unknown fields are ignored. A failure anywhere in the
//! payload fails the whole decode; there is no partial result.

use std::io::Read;

use crate::error::{ClientError, Result};
use crate::models::{RulesEnvelope, RulesResponse};

/// Decode a rules payload from a byte stream or an in-memory slice (`&bytes[..]`).
///
/// `endpoint` is recorded in the error for traceability.
pub fn decode_rules<R: Read>(reader: R, endpoint: &str) -> Result<RulesResponse> {
    let envelope: RulesEnvelope =
        serde_json::from_reader(reader).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;
    Ok(envelope.data)
}
