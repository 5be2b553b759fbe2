use std::{process::Stdio, time::Duration};

use anyhow::{bail, Context, Result};
use rmcp::{
    model::{CallToolRequestParam, ClientInfo},
    serve_client,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    process::Command,
    time::{sleep, timeout},
};

use crate::common::{isolated_command, spawn_server_process};

const INITIALIZE_BODY: &str = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"spawn-test","version":"0.0.0"}}}"#;

fn free_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

async fn connect_with_retry(addr: &str) -> Result<TcpStream> {
    for _ in 0..50 {
        if let Ok(stream) = TcpStream::connect(addr).await {
            return Ok(stream);
        }
        sleep(Duration::from_millis(100)).await;
    }
    bail!("server never started listening on {addr}")
}

/// Read until `needle` shows up or the peer closes the connection.
async fn read_until(stream: &mut TcpStream, needle: &str) -> Result<String> {
    let mut received = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..read]);
        if String::from_utf8_lossy(&received).contains(needle) {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&received).into_owned())
}

#[tokio::test]
async fn stdio_spawn_lists_template_tools() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let list = client.list_tools(None).await?;
    let mut names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["Echo Message", "Get Server Info", "Ping", "hello-world"],
        "list_tools should expose every template tool"
    );

    let pong = client
        .call_tool(CallToolRequestParam {
            name: "Ping".into(),
            arguments: None,
        })
        .await?;
    let text = pong
        .content
        .first()
        .and_then(|content| content.raw.as_text())
        .map(|text| text.text.clone());
    assert_eq!(text.as_deref(), Some("pong"));

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[tokio::test]
async fn http_spawn_answers_initialize_with_application_name() -> Result<()> {
    let port = free_port()?;
    let addr = format!("127.0.0.1:{port}");
    let mut command = Command::from(isolated_command());
    command
        .args(["start", "--transport", "http", "--host", "127.0.0.1", "--port"])
        .arg(port.to_string())
        .env("APP_NAME", "http_spawn_app")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    let mut child = command.spawn().context("failed to spawn server process")?;

    let exchange = async {
        let mut stream = connect_with_retry(&addr).await?;
        let request = format!(
            "POST /mcp HTTP/1.1\r\n\
             Host: {addr}\r\n\
             Content-Type: application/json\r\n\
             Accept: application/json, text/event-stream\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{INITIALIZE_BODY}",
            INITIALIZE_BODY.len()
        );
        stream.write_all(request.as_bytes()).await?;
        read_until(&mut stream, "http_spawn_app").await
    };
    let response = timeout(Duration::from_secs(10), exchange).await;

    child.kill().await?;

    let response = response.context("initialize over HTTP timed out")??;
    assert!(response.starts_with("HTTP/1.1 200"), "response: {response}");
    assert!(response.contains("http_spawn_app"), "response: {response}");
    Ok(())
}
