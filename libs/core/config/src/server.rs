use crate::{env_or_default, ConfigError, FromEnv};
use std::env;
use std::net::Ipv4Addr;

/// Server configuration for the HTTP API
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn parse_port(key: &str, raw: &str) -> Result<u16, ConfigError> {
        raw.parse().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        })
    }
}

impl FromEnv for ServerConfig {
    /// `HTTP_SERVER_LISTEN_ADDR` ("host:port") wins when set. Otherwise:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    fn from_env() -> Result<Self, ConfigError> {
        if let Ok(listen_addr) = env::var("HTTP_SERVER_LISTEN_ADDR") {
            let (host, port) =
                listen_addr
                    .rsplit_once(':')
                    .ok_or_else(|| ConfigError::ParseError {
                        key: "HTTP_SERVER_LISTEN_ADDR".to_string(),
                        details: format!("expected host:port, got '{}'", listen_addr),
                    })?;
            let port = Self::parse_port("HTTP_SERVER_LISTEN_ADDR", port)?;
            let host = if host.is_empty() {
                Ipv4Addr::UNSPECIFIED.to_string()
            } else {
                host.to_string()
            };
            return Ok(Self { host, port });
        }

        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = Self::parse_port("PORT", &env_or_default("PORT", "8080"))?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}
