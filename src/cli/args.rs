//! CLI argument definitions and `LaunchProfile` construction.
use clap::{Args, Parser, Subcommand};

use super::{LaunchProfile, TransportMode};
use crate::server::config::LogLevel;

/// Parsed command intent from CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Version,
}

/// Top-level CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Start the MCP server with the specified configuration.
    Start(StartArgs),
    /// Display the version of the MCP server.
    Version,
}

/// Arguments for `start`. Unset values fall back to the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct StartArgs {
    /// Host to bind the server to (overrides HOST).
    #[arg(long, short = 'H')]
    pub host: Option<String>,
    /// Port to bind the server to (overrides PORT).
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
    /// Enable debug mode.
    #[arg(long, short = 'd', default_value_t = false)]
    pub debug: bool,
    /// Log level (overrides LOG_LEVEL).
    #[arg(long, short = 'l', value_enum, ignore_case = true)]
    pub log_level: Option<LogLevel>,
    /// Select http (default), stdio, or tcp.
    #[arg(long, value_enum, default_value_t = TransportMode::Http)]
    pub transport: TransportMode,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "mcp-server", author, version, about = "MCP Server CLI", long_about = None)]
pub struct LaunchProfileArgs {
    /// Defaults to `start` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl StartArgs {
    /// Build a `LaunchProfile` from `start` arguments.
    pub fn build(self) -> LaunchProfile {
        LaunchProfile {
            transport: self.transport,
            host: self.host,
            port: self.port,
            debug: self.debug,
            log_level: self.log_level,
        }
    }
}

impl LaunchProfileArgs {
    /// Parse CLI args into either server launch mode or the version command.
    pub fn into_command(self) -> ParsedCommand {
        match self.command {
            Some(CliCommand::Start(args)) => ParsedCommand::RunServer(args.build()),
            Some(CliCommand::Version) => ParsedCommand::Version,
            None => ParsedCommand::RunServer(StartArgs::default().build()),
        }
    }
}
