use std::net::SocketAddr;

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

/// HTTP listener and middleware settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Upper bound for JSON request bodies; larger bodies get 413
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub health: HealthConfig,
    /// Absent means permissive CORS
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub client_ip: ClientIpConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            max_body_bytes: default_max_body_bytes(),
            health: HealthConfig::default(),
            cors: None,
            client_ip: ClientIpConfig::default(),
        }
    }
}

/// How the caller's address is derived for visitor tracking
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientIpConfig {
    /// Number of trusted reverse-proxy hops in `X-Forwarded-For`
    #[serde(default)]
    pub trusted_hops: Option<usize>,
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

const fn default_max_body_bytes() -> usize {
    2 << 20
}
