//! Data models for Grafana alerting API responses.

pub mod rules;

pub(crate) use rules::RulesEnvelope;
pub use rules::{AlertInstance, AlertingRule, Labels, RuleGroup, RulesResponse, StateCounts};
