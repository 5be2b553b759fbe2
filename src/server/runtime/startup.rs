use std::{net::SocketAddr, process::ExitCode};

use anyhow::{Context, Error};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder as HttpConnectionBuilder,
    service::TowerToHyperService,
};
use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServiceExt,
};
use tokio::net::{TcpListener, TcpStream};

use crate::{
    cli::{LaunchProfile, TransportMode},
    lib::telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    server::{
        config::AppConfig,
        runtime::{build_instructions, TemplateServer},
    },
};

/// Bundles a startup error with the exit code the process should return.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    detail: String,
    exit_code: ExitCode,
    debug: bool,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:#}"),
            detail: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            debug: false,
        }
    }

    /// Include the full error chain when reporting.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn report(self) -> ExitCode {
        // Configuration errors surface before the logger exists.
        if tracing::dispatcher::has_been_set() {
            tracing::error!(
                target: "mcp_server_template::runtime",
                "Failed to start MCP server: {}",
                self.message
            );
            if self.debug {
                tracing::error!(
                    target: "mcp_server_template::runtime",
                    "Detailed error:\n{}",
                    self.detail
                );
            }
        } else {
            eprintln!("Failed to start MCP server: {}", self.message);
            if self.debug {
                eprintln!("Detailed error:\n{}", self.detail);
            }
        }
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Start the MCP server on the transport chosen by the launch profile.
pub async fn run_server(profile: LaunchProfile, config: AppConfig) -> Result<(), RuntimeExit> {
    let debug = config.server.debug;
    let instructions = build_instructions(&profile, &config);
    let server = TemplateServer::with_default_tools(config.app_name.clone(), instructions);
    let tools = server.tool_names();

    emit_runtime_mode(&RuntimeModeTelemetry {
        app_name: &config.app_name,
        transport: profile.transport.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        debug,
        tools: &tools,
    });

    let result = match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Http => run_http(server, &config).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    };
    result.map_err(|exit| exit.with_debug(debug))
}

async fn run_stdio(server: TemplateServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_http(server: TemplateServer, config: &AppConfig) -> Result<(), RuntimeExit> {
    let (listener, addr) = bind(config).await?;
    tracing::info!(
        target: "mcp_server_template::runtime",
        transport = "http",
        bind_addr = %addr,
        "Started listening in streamable HTTP mode"
    );

    let service = TowerToHyperService::new(StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    ));

    while let Some((stream, peer)) = next_connection(&listener, &addr).await? {
        let service = service.clone();
        tokio::spawn(async move {
            let served = HttpConnectionBuilder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await;
            if let Err(err) = served {
                tracing::warn!(
                    target: "mcp_server_template::runtime",
                    peer = %peer,
                    error = %err,
                    "HTTP connection ended with an error"
                );
            }
        });
    }
    Ok(())
}

async fn run_tcp(server: TemplateServer, config: &AppConfig) -> Result<(), RuntimeExit> {
    let (listener, addr) = bind(config).await?;
    tracing::info!(
        target: "mcp_server_template::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    while let Some((stream, peer)) = next_connection(&listener, &addr).await? {
        tracing::info!(
            target: "mcp_server_template::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );

        let session = server.clone();
        tokio::spawn(async move {
            let outcome = match session.serve(stream).await {
                Ok(running) => running.waiting().await.map(|_| ()).map_err(Error::from),
                Err(err) => Err(Error::from(err)),
            };
            match outcome {
                Ok(()) => tracing::info!(
                    target: "mcp_server_template::runtime",
                    peer = %peer,
                    "MCP client disconnected"
                ),
                Err(err) => tracing::warn!(
                    target: "mcp_server_template::runtime",
                    peer = %peer,
                    error = %err,
                    "MCP session ended with an error"
                ),
            }
        });
    }
    Ok(())
}

async fn bind(config: &AppConfig) -> Result<(TcpListener, String), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    Ok((listener, addr))
}

/// Next accepted connection, or `None` once Ctrl-C is received.
async fn next_connection(
    listener: &TcpListener,
    addr: &str,
) -> Result<Option<(TcpStream, SocketAddr)>, RuntimeExit> {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!(
                target: "mcp_server_template::runtime",
                "Shutdown signal received; no longer accepting connections"
            );
            Ok(None)
        }
        accepted = listener.accept() => accepted
            .map(Some)
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error),
    }
}
