use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use thiserror::Error;

/// Errors that can occur while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to collect environment variables into a configuration document.
    #[error("Failed to read configuration from environment: {source}")]
    Read {
        #[source]
        source: ConfigLoaderError,
    },
    /// Variable is present but cannot be interpreted.
    #[error("Environment variable `{field}` has invalid value `{value}`: {message}")]
    InvalidField {
        field: &'static str,
        value: String,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(source: ConfigLoaderError) -> Self {
        Self::Read { source }
    }
}

/// Errors raised while attaching log sinks.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to turn a tool call into a tool invocation.
#[derive(Debug, Error)]
pub enum ToolCallError {
    #[error("Invalid arguments for tool `{tool}`: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode result of tool `{tool}`: {source}")]
    Encode {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ToolCallError {
    /// Map to the MCP error returned to the calling client.
    pub fn into_error_data(self) -> ErrorData {
        match self {
            ToolCallError::Encode { .. } => ErrorData::internal_error(self.to_string(), None),
            ToolCallError::InvalidArguments { .. } => {
                ErrorData::invalid_params(self.to_string(), None)
            }
        }
    }
}
