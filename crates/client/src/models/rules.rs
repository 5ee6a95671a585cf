//! Alert rule evaluation state models.
//!
//! This module contains the typed hierarchy returned by Grafana's
//! Prometheus-compatible rules endpoint: rule groups, alerting rules and the
//! alert instances each rule currently produces.
//!
//! # What this module handles:
//! - Deserialization of `/api/prometheus/grafana/api/v1/rules` payloads
//! - Read-only lookups over a decoded snapshot
//!
//! # What this module does NOT handle:
//! - Direct HTTP API calls (see [`crate::endpoints::rules`])
//! - Following `groupNextToken` to fetch further pages
//!
//! # Invariants
//! - Values are immutable snapshots; nothing here mutates a decoded response.
//! - Fields the server omits when empty are `Option`s, so a present zero
//!   (`"duration": 0`) stays distinguishable from an absent one.
//! - Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::serde_helpers::{
    default_on_null, opt_counts_from_string_or_number, opt_non_empty_string,
    string_from_number_or_string,
};

/// Label or annotation set. Keys are unique and iterate in sorted order.
pub type Labels = BTreeMap<String, String>;

/// Count per state name (e.g. `"firing" -> 2`).
pub type StateCounts = BTreeMap<String, i64>;

/// Wire envelope: the rules payload is nested under `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct RulesEnvelope {
    #[serde(default)]
    pub data: RulesResponse,
}

/// Decoded rules listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesResponse {
    /// Rule groups in server order.
    #[serde(rename = "groups", default, deserialize_with = "default_on_null")]
    pub groups: Vec<RuleGroup>,
    /// Continuation token; present only when more groups exist server-side.
    #[serde(
        rename = "groupNextToken",
        default,
        deserialize_with = "opt_non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_token: Option<String>,
    /// Rule count per state across the whole listing.
    #[serde(
        default,
        deserialize_with = "opt_counts_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub totals: Option<StateCounts>,
}

/// A named, scheduled collection of alerting rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleGroup {
    #[serde(default, deserialize_with = "default_on_null")]
    pub name: String,
    /// Identifier of the folder owning the group.
    #[serde(default, deserialize_with = "default_on_null")]
    pub folder_uid: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub rules: Vec<AlertingRule>,
    /// Evaluation interval in seconds.
    #[serde(default)]
    pub interval: f64,
    #[serde(default)]
    pub last_evaluation: Option<DateTime<Utc>>,
    /// Duration of the last evaluation in seconds.
    #[serde(default)]
    pub evaluation_time: f64,
}

/// A query-driven alert condition with its current health and state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertingRule {
    #[serde(default, deserialize_with = "default_on_null")]
    pub state: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub name: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub query: String,
    /// Pending period in seconds before the rule fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Seconds the rule keeps firing after its condition clears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_firing_for: Option<f64>,
    #[serde(default, deserialize_with = "default_on_null")]
    pub annotations: Labels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "default_on_null")]
    pub alerts: Vec<AlertInstance>,
    #[serde(
        default,
        deserialize_with = "opt_counts_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub totals: Option<StateCounts>,
    #[serde(
        default,
        deserialize_with = "opt_counts_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub totals_filtered: Option<StateCounts>,
    /// Rule identifier, unique within its folder only.
    #[serde(default, deserialize_with = "default_on_null")]
    pub uid: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub folder_uid: String,
    #[serde(default, deserialize_with = "default_on_null")]
    pub labels: Labels,
    #[serde(default, deserialize_with = "default_on_null")]
    pub health: String,
    #[serde(
        default,
        deserialize_with = "opt_non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_error: Option<String>,
    /// Rule type as reported by the server (e.g. `"alerting"`).
    #[serde(rename = "type", default, deserialize_with = "default_on_null")]
    pub rule_type: String,
    #[serde(default)]
    pub last_evaluation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub evaluation_time: f64,
}

/// One concrete firing or pending occurrence of a rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertInstance {
    #[serde(default, deserialize_with = "default_on_null")]
    pub labels: Labels,
    #[serde(default, deserialize_with = "default_on_null")]
    pub annotations: Labels,
    #[serde(default, deserialize_with = "default_on_null")]
    pub state: String,
    #[serde(default)]
    pub active_at: Option<DateTime<Utc>>,
    /// Evaluated sample value, string-encoded as the server sends it.
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub value: String,
}

impl RulesResponse {
    /// True when the server reported a continuation token.
    pub fn has_more_pages(&self) -> bool {
        self.next_token.is_some()
    }

    /// Continuation token for the next page, if any.
    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    /// Every rule across all groups, in server order.
    pub fn rules(&self) -> impl Iterator<Item = &AlertingRule> {
        self.groups.iter().flat_map(|g| g.rules.iter())
    }

    /// Total number of rules across all groups.
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    /// Find a rule by folder and UID.
    ///
    /// UIDs are only unique within a folder. A rule that does not carry its
    /// own `folderUid` inherits the one of its group.
    pub fn find_rule(&self, folder_uid: &str, uid: &str) -> Option<&AlertingRule> {
        self.groups.iter().find_map(|group| {
            group.rules.iter().find(|rule| {
                let folder = if rule.folder_uid.is_empty() {
                    &group.folder_uid
                } else {
                    &rule.folder_uid
                };
                rule.uid == uid && folder == folder_uid
            })
        })
    }

    /// Total for `state` from the top-level counts, if reported.
    pub fn total(&self, state: &str) -> Option<i64> {
        self.totals.as_ref().and_then(|t| t.get(state).copied())
    }
}

impl AlertingRule {
    /// True when the rule is currently firing.
    pub fn is_firing(&self) -> bool {
        self.state.eq_ignore_ascii_case("firing")
    }

    /// Alert instances that are currently firing.
    pub fn firing_alerts(&self) -> impl Iterator<Item = &AlertInstance> {
        self.alerts.iter().filter(|a| a.is_firing())
    }
}

impl AlertInstance {
    /// True for `Alerting` instances, including `Alerting (NoData)` and `Alerting (Error)`.
    pub fn is_firing(&self) -> bool {
        self.state.starts_with("Alerting") || self.state.eq_ignore_ascii_case("firing")
    }
}
