use std::{io, process::Stdio};

use anyhow::{Context, Result};
use rmcp::{model::ClientInfo, serve_client, service::RunningService, RoleClient, ServiceExt};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
};

use mcp_server_template::server::{config::ENV_KEYS, runtime::TemplateServer};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_mcp-server-template");

/// Command for the server binary with every configuration variable cleared.
pub fn isolated_command() -> std::process::Command {
    let mut command = std::process::Command::new(BINARY_PATH);
    for key in ENV_KEYS {
        command.env_remove(key);
    }
    command.env("LOG_FILE_ENABLED", "false");
    command
}

pub async fn spawn_server_process() -> Result<(Child, ChildIoBridge, Option<JoinHandle<()>>)> {
    let mut command = Command::from(isolated_command());
    command
        .args(["start", "--transport", "stdio"])
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().expect("child stdout");
    let stdin = child.stdin.take().expect("child stdin");
    let bridge = ChildIoBridge::new(stdout, stdin);
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
        })
    });
    Ok((child, bridge, stderr_handle))
}

pub const IN_PROCESS_APP_NAME: &str = "in_process_app";

/// Serve the default tool set over an in-memory duplex pipe.
pub async fn connect_in_process() -> Result<(
    RunningService<RoleClient, ClientInfo>,
    JoinHandle<Result<()>>,
)> {
    let server = TemplateServer::with_default_tools(
        IN_PROCESS_APP_NAME,
        "in-process test server".to_string(),
    );
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}
