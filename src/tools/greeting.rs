//! `hello-world` greeting tool.
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::lib::errors::ToolCallError;

use super::{decode_args, input_schema, ToolHandler, ToolOutput, ToolRegistrar};

pub const HELLO_WORLD_TOOL: &str = "hello-world";
const DEFAULT_GREETING_NAME: &str = "World";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HelloWorldParams {
    /// The name to greet.
    #[serde(default = "default_greeting_name")]
    pub name: String,
}

fn default_greeting_name() -> String {
    DEFAULT_GREETING_NAME.to_string()
}

/// Returns `Hello, {name}!`.
pub fn hello_world(name: &str) -> String {
    info!(
        target: "mcp_server_template::tools",
        "Hello World tool called with name: {name}"
    );
    format!("Hello, {name}!")
}

fn call_hello_world(args: JsonObject) -> Result<ToolOutput, ToolCallError> {
    let params: HelloWorldParams = decode_args(HELLO_WORLD_TOOL, args)?;
    Ok(ToolOutput::Text(hello_world(&params.name)))
}

pub fn register_greeting_tools<R>(registrar: &mut R)
where
    R: ToolRegistrar + ?Sized,
{
    registrar.register(
        HELLO_WORLD_TOOL,
        ToolHandler {
            description: "Returns a greeting message",
            input_schema: input_schema::<HelloWorldParams>,
            call: call_hello_world,
        },
    );
}
