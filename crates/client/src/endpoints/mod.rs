//! REST API endpoint implementations.

pub mod request;
pub mod rules;

pub use request::{REQUEST_TIMEOUT, fetch, join_url};
pub use rules::{RULES_ENDPOINT_PATH, get_rules};
