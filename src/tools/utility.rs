//! General utility tools: echo, server info, ping.
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lib::errors::ToolCallError;

use super::{decode_args, input_schema, ToolHandler, ToolOutput, ToolRegistrar};

pub const ECHO_TOOL: &str = "Echo Message";
pub const SERVER_INFO_TOOL: &str = "Get Server Info";
pub const PING_TOOL: &str = "Ping";

pub const SERVER_PRODUCT_NAME: &str = "MCP Server Template";
pub const SERVER_PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVER_PRODUCT_DESCRIPTION: &str = "A starter template for building MCP servers in Rust";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// The message to echo back.
    pub message: String,
}

/// Tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ServerInfoPayload {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

pub fn echo(message: String) -> String {
    message
}

pub fn server_info() -> ServerInfoPayload {
    ServerInfoPayload {
        name: SERVER_PRODUCT_NAME,
        version: SERVER_PRODUCT_VERSION,
        description: SERVER_PRODUCT_DESCRIPTION,
    }
}

pub fn ping() -> &'static str {
    "pong"
}

fn call_echo(args: JsonObject) -> Result<ToolOutput, ToolCallError> {
    let params: EchoParams = decode_args(ECHO_TOOL, args)?;
    Ok(ToolOutput::Text(echo(params.message)))
}

fn call_server_info(_args: JsonObject) -> Result<ToolOutput, ToolCallError> {
    serde_json::to_value(server_info())
        .map(ToolOutput::Structured)
        .map_err(|source| ToolCallError::Encode {
            tool: SERVER_INFO_TOOL,
            source,
        })
}

fn call_ping(_args: JsonObject) -> Result<ToolOutput, ToolCallError> {
    Ok(ToolOutput::Text(ping().to_string()))
}

/// Registration order is part of the listing clients see.
const UTILITY_TOOLS: [(&str, ToolHandler); 3] = [
    (
        ECHO_TOOL,
        ToolHandler {
            description: "Echo back the received message",
            input_schema: input_schema::<EchoParams>,
            call: call_echo,
        },
    ),
    (
        SERVER_INFO_TOOL,
        ToolHandler {
            description: "Get information about the MCP server",
            input_schema: input_schema::<NoParams>,
            call: call_server_info,
        },
    ),
    (
        PING_TOOL,
        ToolHandler {
            description: "Simple ping tool to check if the server is responsive",
            input_schema: input_schema::<NoParams>,
            call: call_ping,
        },
    ),
];

pub fn register_utility_tools<R>(registrar: &mut R)
where
    R: ToolRegistrar + ?Sized,
{
    for (name, handler) in UTILITY_TOOLS {
        registrar.register(name, handler);
    }
}
