use std::{env, net::SocketAddr};

use thiserror::Error;

use crate::domain::availability::SourceKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub service_name: Option<String>,
    pub source_kind: SourceKind,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("DISPONIBILITY_SOURCE must be one of: uniform, normal")]
    InvalidSource,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let bind_port = env::var("BIND_PORT")
            .ok()
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let service_name = env::var("SERVICE_NAME")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let source_kind = env::var("DISPONIBILITY_SOURCE")
            .ok()
            .map(|value| SourceKind::parse(&value).ok_or(ConfigError::InvalidSource))
            .transpose()?
            .unwrap_or(SourceKind::Normal);

        let config = Self {
            bind_addr,
            bind_port,
            service_name,
            source_kind,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}
