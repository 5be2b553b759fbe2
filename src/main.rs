//! Entry point for the MCP server template.
use std::{env, process::ExitCode};

use clap::Parser;
use mcp_server_template::{
    cli::{version_line, LaunchProfile, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::{self, parse_flag},
        runtime::{self, RuntimeExit},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let code = match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    };
    telemetry::shutdown_logging();
    code
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    dotenvy::dotenv().ok();
    let args = LaunchProfileArgs::parse();

    match args.into_command() {
        ParsedCommand::RunServer(profile) => run_server(profile).await,
        ParsedCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
    }
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = config::load_config().map_err(|err| {
        let debug = profile.debug || parse_flag(env::var("DEBUG").ok().as_deref(), false);
        RuntimeExit::from_error(err).with_debug(debug)
    })?;
    let config = profile.apply(config);

    telemetry::setup_logging(Some(&config.app_name), &config.logging);
    config::telemetry::log_loaded(&config);

    runtime::run_server(profile, config).await
}
