use super::{non_empty, parse_flag, RawAppConfig};

/// Wildcard origin used when `CORS_ORIGINS` is unset or lists no origin.
pub const CORS_ALLOW_ALL: &str = "*";

/// Security settings. Loaded and reported at startup but not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    pub api_key_enabled: bool,
    pub api_key: Option<String>,
    pub cors_enabled: bool,
    pub cors_origins: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            api_key_enabled: false,
            api_key: None,
            cors_enabled: true,
            cors_origins: vec![CORS_ALLOW_ALL.to_string()],
        }
    }
}

pub fn parse_security_section(raw: &RawAppConfig) -> SecurityConfig {
    SecurityConfig {
        api_key_enabled: parse_flag(raw.api_key_enabled.as_deref(), false),
        api_key: non_empty(raw.api_key.as_deref()).map(str::to_string),
        cors_enabled: parse_flag(raw.cors_enabled.as_deref(), true),
        cors_origins: raw
            .cors_origins
            .as_deref()
            .map(parse_cors_origins)
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![CORS_ALLOW_ALL.to_string()]),
    }
}

/// Split a comma-separated origin list. `*` stays a single literal entry.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
