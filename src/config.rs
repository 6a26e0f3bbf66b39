//! Service configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Deserializer};

use crate::error::ServiceError;

/// Service configuration loaded from environment variables.
///
/// Every field has a default. Malformed `PORT` and `HOST` values fall back
/// to their defaults instead of failing the load.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Listener ===
    /// TCP port to listen on. `0` asks the OS for an ephemeral port.
    #[serde(default = "default_port", deserialize_with = "port_or_default")]
    pub port: u16,

    /// Interface to bind.
    #[serde(default = "default_host", deserialize_with = "host_or_default")]
    pub host: IpAddr,

    // === Response constants ===
    /// Author reported by `GET /health`.
    #[serde(default = "default_health_author")]
    pub health_author: String,

    /// Author reported by `GET /hello`.
    #[serde(default = "default_hello_author")]
    pub hello_author: String,

    // === Logging ===
    /// Log filter (trace, debug, info, warn, error or a full directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_health_author() -> String {
    "Julian de Jesus Gutierrez Lopez".to_string()
}

fn default_hello_author() -> String {
    "OA Soy un GET para dev 3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or_else(|_| default_port()))
}

fn host_or_default<'de, D>(deserializer: D) -> Result<IpAddr, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or_else(|_| default_host()))
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env().map_err(ServiceError::Config)
    }

    /// Build configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::from_iter(vars.into_iter().map(|(k, v)| (k.into(), v.into())))
            .map_err(ServiceError::Config)
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            health_author: default_health_author(),
            hello_author: default_hello_author(),
            rust_log: default_log_level(),
        }
    }
}
