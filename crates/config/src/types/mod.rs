//! Configuration types for the Grafana alerting client.

pub mod auth;
pub mod connection;
pub mod tls;

pub use auth::IdentityConfig;
pub use connection::{Config, ConnectionConfig};
pub use tls::TlsConfig;
