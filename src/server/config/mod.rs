//! Load configuration from environment variables.
use std::env;

use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub mod logging;
pub mod security;
pub mod server;
pub mod telemetry;

pub use logging::{
    parse_logging_section, LogLevel, LoggingConfig, DEFAULT_LOG_DIR, DEFAULT_LOG_FORMAT,
};
pub use security::{parse_cors_origins, parse_security_section, SecurityConfig};
pub use server::{parse_port, parse_server_section, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

/// Name used when `APP_NAME` is not set.
pub const DEFAULT_APP_NAME: &str = "mcp_server";

/// Environment variables read by [`load_config`].
pub const ENV_KEYS: [&str; 12] = [
    "APP_NAME",
    "HOST",
    "PORT",
    "DEBUG",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "LOG_FILE_ENABLED",
    "LOG_FILE_DIR",
    "API_KEY_ENABLED",
    "API_KEY",
    "CORS_ENABLED",
    "CORS_ORIGINS",
];

/// Top-level configuration container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Environment variables as collected by the `config` crate (keys lowercased).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAppConfig {
    pub app_name: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub debug: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file_enabled: Option<String>,
    pub log_file_dir: Option<String>,
    pub api_key_enabled: Option<String>,
    pub api_key: Option<String>,
    pub cors_enabled: Option<String>,
    pub cors_origins: Option<String>,
}

/// Read configuration from the process environment.
///
/// Logging is normally not configured yet at this point; callers report the
/// result with [`telemetry::log_loaded`] once the logger is up.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let vars = env::vars_os().filter_map(|(key, value)| {
        let key = key.into_string().ok()?;
        if !ENV_KEYS.contains(&key.as_str()) {
            return None;
        }
        Some((key, value.into_string().ok()?))
    });
    load_config_from(vars)
}

/// Read configuration from an explicit set of variables.
pub fn load_config_from<I, K, V>(vars: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let source: config::Map<String, String> = vars
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();

    let document = config::Config::builder()
        .add_source(config::Environment::default().source(Some(source)))
        .build()
        .map_err(|err| {
            let error = ConfigError::from_read_error(err);
            error!(
                target: "mcp_server_template::config",
                reason = %error,
                "Failed to collect environment variables"
            );
            error
        })?;

    let raw: RawAppConfig = document
        .try_deserialize()
        .map_err(ConfigError::from_read_error)?;

    AppConfig::from_raw(raw).map_err(|err| {
        error!(
            target: "mcp_server_template::config",
            reason = %err,
            "Failed to validate configuration"
        );
        err
    })
}

impl AppConfig {
    fn from_raw(raw: RawAppConfig) -> Result<Self, ConfigError> {
        let server = parse_server_section(&raw)?;
        let logging = parse_logging_section(&raw);
        let security = parse_security_section(&raw);
        let app_name = non_empty(raw.app_name.as_deref())
            .unwrap_or(DEFAULT_APP_NAME)
            .to_string();

        Ok(Self {
            app_name,
            server,
            logging,
            security,
        })
    }
}

/// `true` (case-insensitive) enables a flag; any other value disables it.
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    raw.map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}
