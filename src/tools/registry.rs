//! Registrar capability, implemented over rmcp's tool router.
use rmcp::{
    handler::server::router::tool::{ToolRoute, ToolRouter},
    model::Tool,
};
use tracing::warn;

use super::{register_tools, ToolHandler, ToolOutput};

pub type ServerToolRouter<S> = ToolRouter<S>;

/// Anything that accepts `(name, handler)` pairs and makes them callable.
pub trait ToolRegistrar {
    fn register(&mut self, name: &'static str, handler: ToolHandler);
}

/// Registering an existing name replaces its route.
impl<S> ToolRegistrar for ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    fn register(&mut self, name: &'static str, handler: ToolHandler) {
        let tool = Tool::new(name, handler.description, (handler.input_schema)());
        let call = handler.call;

        self.add_route(ToolRoute::new_dyn(tool, move |context| {
            let outcome = call(context.arguments.unwrap_or_default())
                .map(ToolOutput::into_call_result)
                .map_err(|err| {
                    warn!(
                        target: "mcp_server_template::tools",
                        tool = name,
                        error = %err,
                        "Tool call rejected"
                    );
                    err.into_error_data()
                });
            Box::pin(std::future::ready(outcome))
        }));
    }
}

/// Router holding every tool the template ships.
pub fn build_router<S>() -> ServerToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    register_tools(&mut router);
    router
}
