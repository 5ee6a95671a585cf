//! Configuration management for the Grafana alerting client.
//!
//! This crate provides explicit configuration values (connection, TLS and
//! identity material) and a loader that fills them from `.env` files and
//! environment variables.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig, IdentityConfig, TlsConfig};
