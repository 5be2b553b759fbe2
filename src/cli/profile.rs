//! LaunchProfile and CLI-over-environment resolution.
use clap::ValueEnum;

use crate::server::config::{AppConfig, LogLevel};

/// MCP transport mode.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    /// Single session over stdin/stdout.
    Stdio,
    /// Streamable HTTP on `HOST:PORT`.
    #[default]
    Http,
    /// Newline-delimited JSON-RPC over raw TCP on `HOST:PORT`.
    Tcp,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Http => "http",
            TransportMode::Tcp => "tcp",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchProfile {
    pub transport: TransportMode,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub log_level: Option<LogLevel>,
}

impl LaunchProfile {
    /// Overlay CLI values on the environment configuration.
    ///
    /// `--debug` can only enable debug mode; it never turns off `DEBUG=true`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.debug {
            config.server.debug = true;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        config
    }
}
