use tracing::info;

use super::AppConfig;

pub fn log_loaded(config: &AppConfig) {
    info!(
        target: "mcp_server_template::config",
        app_name = %config.app_name,
        host = %config.server.host,
        port = config.server.port,
        debug = config.server.debug,
        log_level = %config.logging.level,
        log_file_enabled = config.logging.file_enabled,
        log_file_dir = %config.logging.file_dir,
        api_key_enabled = config.security.api_key_enabled,
        api_key_set = config.security.api_key.is_some(),
        cors_enabled = config.security.cors_enabled,
        cors_origins = ?config.security.cors_origins,
        "Configuration loaded from environment"
    );
}
