use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, CallToolResult, ErrorCode},
    service::ServiceError,
};
use serde_json::{json, Value};

use crate::common::{connect_in_process, IN_PROCESS_APP_NAME};

fn first_text(result: &CallToolResult) -> Option<String> {
    result
        .content
        .first()
        .and_then(|content| content.raw.as_text())
        .map(|text| text.text.clone())
}

fn args(value: Value) -> Option<rmcp::model::JsonObject> {
    Some(value.as_object().expect("JSON object").clone())
}

#[tokio::test]
async fn hello_world_greets_given_name_and_defaults_to_world() -> Result<()> {
    let (client, server_task) = connect_in_process().await?;

    let named = client
        .call_tool(CallToolRequestParam {
            name: "hello-world".into(),
            arguments: args(json!({ "name": "Alice" })),
        })
        .await;
    let unnamed = client
        .call_tool(CallToolRequestParam {
            name: "hello-world".into(),
            arguments: None,
        })
        .await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_eq!(
        first_text(&named.expect("hello-world with a name")).as_deref(),
        Some("Hello, Alice!")
    );
    assert_eq!(
        first_text(&unnamed.expect("hello-world without arguments")).as_deref(),
        Some("Hello, World!")
    );
    Ok(())
}

#[tokio::test]
async fn echo_and_server_info_round_trip_through_client() -> Result<()> {
    let (client, server_task) = connect_in_process().await?;

    let echoed = client
        .call_tool(CallToolRequestParam {
            name: "Echo Message".into(),
            arguments: args(json!({ "message": "test message" })),
        })
        .await;
    let info = client
        .call_tool(CallToolRequestParam {
            name: "Get Server Info".into(),
            arguments: None,
        })
        .await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_eq!(
        first_text(&echoed.expect("echo should succeed")).as_deref(),
        Some("test message")
    );
    let payload = info
        .expect("server info should succeed")
        .structured_content
        .expect("structured_content should exist");
    assert_eq!(
        payload.get("name").and_then(|v| v.as_str()),
        Some("MCP Server Template")
    );
    assert_eq!(
        payload.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert!(payload.get("description").and_then(|v| v.as_str()).is_some());
    Ok(())
}

#[tokio::test]
async fn echo_without_message_is_rejected_as_invalid_params() -> Result<()> {
    let (client, server_task) = connect_in_process().await?;

    let result = client
        .call_tool(CallToolRequestParam {
            name: "Echo Message".into(),
            arguments: None,
        })
        .await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    match result.expect_err("missing message must fail") {
        ServiceError::McpError(inner) => assert_eq!(inner.code, ErrorCode::INVALID_PARAMS),
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_rejected() -> Result<()> {
    let (client, server_task) = connect_in_process().await?;

    let result = client
        .call_tool(CallToolRequestParam {
            name: "does-not-exist".into(),
            arguments: None,
        })
        .await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    match result.expect_err("unknown tool must fail") {
        ServiceError::McpError(inner) => assert_eq!(inner.code, ErrorCode::INVALID_PARAMS),
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn initialize_reports_application_name_and_version() -> Result<()> {
    let (client, server_task) = connect_in_process().await?;

    let server_info = client
        .peer_info()
        .map(|info| info.server_info.clone())
        .expect("initialize result should be recorded");

    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_eq!(server_info.name, IN_PROCESS_APP_NAME);
    assert_eq!(server_info.version, env!("CARGO_PKG_VERSION"));
    Ok(())
}
