//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the alerting client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock setup beyond the rules endpoint (use wiremock directly in tests)

// Re-export test utilities from grafana-alerting-client
#[allow(unused_imports)]
pub use grafana_alerting_client::testing::load_fixture;

// Re-export commonly used types for test convenience
#[allow(unused_imports)]
pub use grafana_alerting_client::endpoints::RULES_ENDPOINT_PATH;
#[allow(unused_imports)]
pub use grafana_alerting_client::{AlertingClient, ClientError};
#[allow(unused_imports)]
pub use grafana_alerting_config::IdentityConfig;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use wiremock::matchers::{method, path};

/// Mount the rules endpoint on `server`, answering with `template`.
#[allow(dead_code)]
pub async fn mount_rules(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(RULES_ENDPOINT_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Build a client pointed at `server` with the given credentials.
#[allow(dead_code)]
pub fn client_for(server: &MockServer, identity: IdentityConfig) -> AlertingClient {
    AlertingClient::builder()
        .base_url(server.uri())
        .identity(identity)
        .build()
        .expect("client should build against mock server")
}
