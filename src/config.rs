//! Server Configuration
//!
//! Resolved settings handed from the CLI to the composition root.

use crate::auth::DemoCredentials;
use crate::seed::SeedConfig;
use std::net::SocketAddr;

/// Default HTTP bind address
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:5189";

/// Everything needed to build and run the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind: SocketAddr,
    /// Seed data parameters
    pub seed: SeedConfig,
    /// Demo login pair
    pub credentials: DemoCredentials,
}

impl ServerConfig {
    /// Build a config, parsing the bind address
    pub fn new(
        bind: &str,
        seed: SeedConfig,
        credentials: DemoCredentials,
    ) -> Result<Self, ConfigError> {
        let bind = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind.to_string()))?;
        Ok(Self {
            bind,
            seed,
            credentials,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address: {0}")]
    InvalidBindAddress(String),
}
