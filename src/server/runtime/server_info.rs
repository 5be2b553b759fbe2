use crate::{cli::LaunchProfile, server::config::AppConfig};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &AppConfig) -> String {
    format!(
        "{app} serving in {transport} mode (host={host}, port={port}). Call `Ping` to check liveness or `Get Server Info` for version details.",
        app = config.app_name,
        transport = profile.transport.as_str(),
        host = config.server.host,
        port = config.server.port
    )
}
