use crate::lib::errors::ConfigError;

use super::{non_empty, parse_flag, RawAppConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Server socket settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

pub fn parse_server_section(raw: &RawAppConfig) -> Result<ServerConfig, ConfigError> {
    let host = non_empty(raw.host.as_deref())
        .unwrap_or(DEFAULT_HOST)
        .to_string();
    let port = match raw.port.as_deref() {
        Some(value) => parse_port(value)?,
        None => DEFAULT_PORT,
    };
    let debug = parse_flag(raw.debug.as_deref(), false);

    Ok(ServerConfig { host, port, debug })
}

/// `PORT` must be an integer; anything else stops startup.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|err| ConfigError::InvalidField {
            field: "PORT",
            value: value.to_string(),
            message: format!("expected an integer in 0-65535 ({err})"),
        })
}
