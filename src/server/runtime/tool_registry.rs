use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::tools::{self, ServerToolRouter, SERVER_PRODUCT_VERSION};

/// MCP handler serving the registered tools under the application's name.
#[derive(Clone)]
pub struct TemplateServer {
    app_name: Arc<String>,
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
}

impl TemplateServer {
    pub fn new(
        app_name: impl Into<String>,
        instructions: String,
        tool_router: ServerToolRouter<Self>,
    ) -> Self {
        Self {
            app_name: Arc::new(app_name.into()),
            instructions: Arc::new(instructions),
            tool_router,
        }
    }

    /// Server with every tool the template ships.
    pub fn with_default_tools(app_name: impl Into<String>, instructions: String) -> Self {
        Self::new(app_name, instructions, tools::build_router())
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.into_owned())
            .collect()
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TemplateServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: (*self.app_name).clone(),
                version: SERVER_PRODUCT_VERSION.to_string(),
                ..Implementation::from_build_env()
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
