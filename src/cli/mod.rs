//! CLI entrypoint module structure.

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand, StartArgs};
pub use profile::{LaunchProfile, TransportMode};

/// Line printed by the `version` command.
pub fn version_line() -> String {
    format!("MCP Server Template v{}", env!("CARGO_PKG_VERSION"))
}
