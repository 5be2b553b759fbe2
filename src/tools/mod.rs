//! MCP tools exposed by the server and the registration seam they go through.

pub mod greeting;
pub mod registry;
pub mod utility;

use std::sync::Arc;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Content, JsonObject},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::lib::errors::ToolCallError;

pub use greeting::{hello_world, register_greeting_tools, HelloWorldParams, HELLO_WORLD_TOOL};
pub use registry::{build_router, ServerToolRouter, ToolRegistrar};
pub use utility::{
    echo, ping, register_utility_tools, server_info, EchoParams, ServerInfoPayload,
    ECHO_TOOL, PING_TOOL, SERVER_INFO_TOOL, SERVER_PRODUCT_NAME, SERVER_PRODUCT_VERSION,
};

/// Adapter from raw call arguments to a tool result.
pub type ToolFn = fn(JsonObject) -> Result<ToolOutput, ToolCallError>;

/// Everything a registrar needs to expose one tool besides its name.
#[derive(Debug, Clone, Copy)]
pub struct ToolHandler {
    pub description: &'static str,
    pub input_schema: fn() -> Arc<JsonObject>,
    pub call: ToolFn,
}

/// Value produced by a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Structured(Value),
}

impl ToolOutput {
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            ToolOutput::Text(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutput::Structured(value) => CallToolResult::structured(value),
        }
    }
}

/// Register every tool the template ships: the greeting, then the utilities.
pub fn register_tools<R>(registrar: &mut R)
where
    R: ToolRegistrar + ?Sized,
{
    register_greeting_tools(registrar);
    register_utility_tools(registrar);
}

/// Input schema of a parameter type, as rmcp generates it for `#[tool]` methods.
pub fn input_schema<T: JsonSchema + 'static>() -> Arc<JsonObject> {
    schema_for_type::<T>().into()
}

/// Decode call arguments into the tool's parameter type.
pub fn decode_args<T: DeserializeOwned>(
    tool: &'static str,
    args: JsonObject,
) -> Result<T, ToolCallError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|source| ToolCallError::InvalidArguments { tool, source })
}
