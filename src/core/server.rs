//! MCP Server implementation and lifecycle management.
//!
//! The server owns one [`FredClient`] shared by every tool. STDIO requests
//! are routed by rmcp through the [`ToolRouter`]; the HTTP transport goes
//! through the [`ToolRegistry`] instead.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::instrument;

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::fred::FredClient;
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// Instructions sent to clients on initialize.
pub const SERVER_INSTRUCTIONS: &str = "Economic data from FRED (Federal Reserve Economic Data). \
     Use search_fred to find series IDs, get_fred_data for recent observations, \
     get_fred_historical for multi-year summaries, fred_dashboard for headline indicators, \
     get_multiple_series to compare series and get_fred_series_info for metadata.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared FRED client.
    client: Arc<FredClient>,

    /// Name-based dispatch for HTTP.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by the real FRED API.
    pub fn new(config: Config) -> CoreResult<Self> {
        let client = FredClient::from_config(&config.fred)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a server around an existing client.
    pub fn with_client(config: Config, client: Arc<FredClient>) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::new(client.clone())),
            tool_router: build_tool_router::<Self>(client.clone()),
            client,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the shared FRED client.
    pub fn client(&self) -> &Arc<FredClient> {
        &self.client
    }

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
